/// マッチスコアの配点（合計100点）。
/// スキル重複を最重視し、希望キャリア、勤務形態の順で軽くなる。
/// `score_band` の表示バンドと互換を保つため固定値。
pub const SCORE_WEIGHTS: Weights = Weights {
    skills: 50.0,
    carriers: 30.0,
    work_type: 20.0,
};

#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub skills: f64,
    pub carriers: f64,
    pub work_type: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.skills + self.carriers + self.work_type
    }
}
