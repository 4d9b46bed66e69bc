//! Central UI style constants and helpers.

use chrono::{DateTime, Utc};
use serenity::builder::CreateEmbed;

pub const COLOR_INFO: u32 = 0x3498DB; // Blue
pub const COLOR_SUCCESS: u32 = 0x2ECC71; // Green
pub const COLOR_ALERT: u32 = 0xE74C3C; // Red

pub const EMOJI_APPROVE: &str = "✅";
pub const EMOJI_DENY: &str = "❌";

/// Digit emoji for a 1-10 warning severity.
pub fn severity_emoji(severity: u8) -> &'static str {
    match severity {
        1 => "1️⃣",
        2 => "2️⃣",
        3 => "3️⃣",
        4 => "4️⃣",
        5 => "5️⃣",
        6 => "6️⃣",
        7 => "7️⃣",
        8 => "8️⃣",
        9 => "9️⃣",
        10 => "🔟",
        _ => "❓",
    }
}

/// Red tint scaled by average severity, used for warning record embeds.
pub fn severity_color(average: f64) -> u32 {
    let red = ((255.0 * average) / 10.0).clamp(0.0, 255.0) as u32;
    red << 16
}

/// `<t:..:R>` markup, rendered by Discord as a relative timestamp.
pub fn relative_timestamp(at: DateTime<Utc>) -> String {
    format!("<t:{}:R>", at.timestamp())
}

/// Convenience builder for a neutral informational embed.
pub fn info_embed<T: Into<String>, U: Into<String>>(title: T, description: U) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .color(COLOR_INFO)
}

/// Convenience builder for a success-styled embed.
pub fn success_embed<T: Into<String>, U: Into<String>>(title: T, description: U) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .color(COLOR_SUCCESS)
}

/// Convenience builder for an alert/error-styled embed.
pub fn error_embed<T: Into<String>, U: Into<String>>(title: T, description: U) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .color(COLOR_ALERT)
}
