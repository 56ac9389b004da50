use rand::seq::SliceRandom;
use rand::Rng;

pub const INSIGHTS: [&str; 4] = [
    "💡 Tip: Lisa Wang shows strong portfolio projects despite non-traditional background",
    "🔍 Pattern detected: Candidates with startup experience show 23% higher performance",
    "📊 This role typically sees 15% higher success with remote work experience",
    "⚡ Fast-track suggestion: 3 candidates match your previous successful hires",
];

pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    INSIGHTS.choose(rng).copied().unwrap_or(INSIGHTS[0])
}
