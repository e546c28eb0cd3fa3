use std::fmt;

/// (案件, 人材) ペアから決定的に導出されるマッチID。
///
/// ハッシュではなく合成キーそのものを使う。区切り文字 `:` はバックエンドの
/// 行ID（ULID/UUID）のアルファベットに含まれないため、異なるペアが同じ
/// IDになることはない。順序は案件側が先で固定。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchId(String);

impl MatchId {
    pub fn derive(job_id: &str, talent_id: &str) -> Self {
        MatchId(format!("{job_id}:{talent_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ダイレクトルーム用の決定的キー。マッチIDと同じ導出規則を使い、
/// ルーム名の部分一致ではなくキー等価で既存ルームを特定する。
pub fn room_key(job_id: &str, talent_id: &str) -> String {
    format!("dm:{job_id}:{talent_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_pair_always_derives_same_id() {
        let a = MatchId::derive("job-1", "talent-7");
        let b = MatchId::derive("job-1", "talent-7");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "job-1:talent-7");
    }

    #[test]
    fn distinct_pairs_never_collide() {
        let ids = [
            MatchId::derive("job-1", "talent-7"),
            MatchId::derive("job-1", "talent-8"),
            MatchId::derive("job-2", "talent-7"),
            MatchId::derive("job-2", "talent-8"),
        ];

        for (i, a) in ids.iter().enumerate() {
            for (j, b) in ids.iter().enumerate() {
                assert_eq!(i == j, a == b);
            }
        }
    }

    #[test]
    fn order_is_fixed_job_first() {
        assert_ne!(
            MatchId::derive("alpha", "beta"),
            MatchId::derive("beta", "alpha")
        );
    }

    #[test]
    fn room_key_matches_identity_derivation() {
        assert_eq!(room_key("job-1", "talent-7"), "dm:job-1:talent-7");
        assert_eq!(room_key("job-1", "talent-7"), room_key("job-1", "talent-7"));
    }
}
