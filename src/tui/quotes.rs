//! Motivation quotes shown on the home section.

pub const QUOTES: [&str; 15] = [
    "Stay focused, stay determined.",
    "Every step counts!",
    "You are capable of amazing things.",
    "Push through the hard times.",
    "Discipline outperforms motivation.",
    "Keep going, you're almost there.",
    "Progress over perfection.",
    "Focus. Breathe. Achieve.",
    "Study smart, not hard.",
    "Success is built on consistency.",
    "Small steps lead to big change.",
    "Dream big. Study bigger.",
    "Be proud of every small win.",
    "Hard work beats talent.",
    "The grind brings the shine.",
];

/// Pick a quote for a rotation index, wrapping around the set.
pub fn quote_at(idx: usize) -> &'static str {
    QUOTES[idx % QUOTES.len()]
}
