pub const INSIGHT_ADVISOR: &str = "You are a Senior Bioinformatics Advisor. Be concise.";

pub const CHAT_CLOSING: &str = "Keep answers professional and concise.";
