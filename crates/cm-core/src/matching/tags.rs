use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

/// タグ1件の正規化（NFKC → trim → 小文字化）。
///
/// 全角英数や半角カナが混ざった入力（"ｄｏｃｏｍｏ"、"ﾄﾞｺﾓ" 等）を
/// 同一視するため、集合演算の前に必ず通す。
pub fn normalize_tag(tag: &str) -> String {
    tag.nfkc().collect::<String>().trim().to_lowercase()
}

/// タグ列を正規化済み集合に変換。空白のみの要素は落とす。
pub fn normalize_tag_set(tags: &[String]) -> HashSet<String> {
    tags.iter()
        .map(|tag| normalize_tag(tag))
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// 分子=共通件数 / 分母=基準側（案件側）の件数。基準側が空なら `None`
/// を返し、呼び出し側でゼロ寄与として扱う。
pub fn overlap_ratio(reference: &HashSet<String>, other: &HashSet<String>) -> Option<f64> {
    if reference.is_empty() {
        return None;
    }
    let matched = reference.intersection(other).count();
    Some(matched as f64 / reference.len() as f64)
}
