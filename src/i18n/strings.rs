//! User-facing bot strings.
//!
//! The bot's audience is Uzbek-speaking, so all UI text is Uzbek. Strings used
//! with `parse_mode = "HTML"` are marked as such; everything else is plain text.

use crate::i18n::Language;

/// All user-facing strings shown by the bot.
#[derive(Debug, Clone)]
pub struct BotStrings {
    // ==================== Empty Query ====================
    /// Title of the usage hint shown for an empty inline query
    pub usage_title: &'static str,

    /// Description of the usage hint
    pub usage_description: &'static str,

    /// Message sent if the user picks the usage hint
    pub usage_message: &'static str,

    // ==================== Missing Text ====================
    /// Title shown when the query names a language but has no text
    pub no_text_title: &'static str,

    pub no_text_description: &'static str,

    pub no_text_message: &'static str,

    // ==================== Unknown Language ====================
    /// Title shown when the first word is not a language (strict parsing only)
    pub unknown_language_title: &'static str,

    /// Placeholder: {token}
    pub unknown_language_description: &'static str,

    // ==================== Translation Failure ====================
    /// Title shown when the primary translation fails
    pub failure_title: &'static str,

    pub failure_description: &'static str,

    pub failure_message: &'static str,

    // ==================== Combined Result ====================
    /// Title of the "original + translation" result
    pub combined_title: &'static str,

    // ==================== Commands ====================
    /// Reply to /start and /help (HTML parse mode).
    /// Placeholders: {bot}, {quick}
    pub help_html: &'static str,

    /// `{quick}` section when untagged text goes to the default language.
    /// Placeholder: {language}
    pub quick_default_html: &'static str,

    /// `{quick}` section when a language must always be named
    pub quick_strict_html: &'static str,

    // ==================== Health Page ====================
    /// Body of `GET /` (HTML)
    pub health_page_html: &'static str,

    /// Message field of `GET /health`
    pub health_message: &'static str,
}

impl BotStrings {
    /// The Uzbek string table.
    pub fn get() -> &'static BotStrings {
        &UZBEK
    }

    /// Help text for the bot's username.
    ///
    /// `fallback` is the language untagged text is translated into, or `None`
    /// if such queries are rejected.
    pub fn help_for(&self, bot_username: &str, fallback: Option<Language>) -> String {
        let quick = match fallback {
            Some(language) => self.quick_default_html.replace("{language}", language.label()),
            None => self.quick_strict_html.to_string(),
        };

        self.help_html
            .replace("{quick}", &quick)
            .replace("{bot}", bot_username)
    }
}

static UZBEK: BotStrings = BotStrings {
    usage_title: "📖 Qanday ishlatish",
    usage_description: "Til kodini va matnni kiriting. Masalan: ru Salom",
    usage_message: "Botdan foydalanish:\n\n\
        1. Bot nomini yozing\n\
        2. Til kodini kiriting (ru, en, uz, va h.k.)\n\
        3. Tarjima qilmoqchi bo'lgan matnni yozing\n\n\
        Misol: ru Salom → Здравствуйте",

    no_text_title: "❌ Matn kiritilmagan",
    no_text_description: "Til va matnni kiriting",
    no_text_message: "Matn kiritilmadi",

    unknown_language_title: "❓ Til topilmadi",
    unknown_language_description: "'{token}' noma'lum til. Masalan: ru Salom",

    failure_title: "❌ Tarjima xatosi",
    failure_description: "Qayta urinib ko'ring",
    failure_message: "Tarjima qilishda xatolik yuz berdi. Iltimos, qayta urinib ko'ring.",

    combined_title: "📋 Asl matn + Tarjima",

    help_html: r#"🌍 <b>Tarjima Bot - Inline Translation Bot</b>

Bu bot har qanday chatda inline rejimda ishlaydi va matnni 30 tilga tarjima qiladi!

<b>📝 Qanday ishlatish:</b>

1️⃣ Har qanday chatda bot nomini yozing:
   <code>@{bot}</code>

2️⃣ Til kodini va matnni kiriting:
   <code>@{bot} ru Salom</code>
   <code>@{bot} en Привет</code>
   <code>@{bot} uz Hello</code>

3️⃣ Variantlardan birini tanlang va yuboring!

<b>🌐 Til kodlari (har xil variantlarda):</b>

🇬🇧 <b>Ingliz:</b> en, eng, english, ingliz
🇷🇺 <b>Rus:</b> ru, rus, russian, русский
🇺🇿 <b>O'zbek:</b> uz, uzbek, o'zbek, ozbek
🇹🇷 <b>Turk:</b> tr, turk, turkish, türkçe
🇩🇪 <b>Nemis:</b> de, german, deutsch
🇫🇷 <b>Fransuz:</b> fr, french, français
🇪🇸 <b>Ispan:</b> es, spanish, español
🇸🇦 <b>Arab:</b> ar, arabic, عربي
🇨🇳 <b>Xitoy:</b> zh, chinese, 中文
🇯🇵 <b>Yapon:</b> ja, japanese, 日本語
🇰🇷 <b>Koreys:</b> ko, korean, 한국어
🇮🇹 <b>Italyan:</b> it, italian, italiano
🇵🇹 <b>Portugal:</b> pt, portuguese
🇮🇳 <b>Hind:</b> hi, hindi, हिन्दी

<b>💡 Misollar:</b>
• <code>@{bot} ru Salom do'stim</code> → Здравствуй мой друг
• <code>@{bot} english Привет</code> → Hello
• <code>@{bot} türkçe Hello world</code> → Merhaba dünya

{quick}

<i>Botdan foydalanish uchun uni inline rejimga ulang!</i>"#,

    quick_default_html: "<b>⚡ Tez tarjima:</b>\n\
        Agar til kodini yozmasangiz, matn avtomatik ravishda standart tilga \
        ({language}) tarjima qilinadi.",

    quick_strict_html: "<b>⚠️ Eslatma:</b>\n\
        Til kodi har doim birinchi so'z bo'lishi, undan keyin matn kelishi kerak.",

    health_page_html: r#"<html>
<head><title>Telegram Translation Bot</title></head>
<body style="font-family: Arial; text-align: center; padding: 50px;">
    <h1>🤖 Bot Ishlayapti!</h1>
    <p>✅ Translation bot ishga tushgan va tayyor</p>
    <p>📱 Telegram'da botni ishlating</p>
</body>
</html>"#,

    health_message: "Bot ishlayapti ✅",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_for_substitutes_every_placeholder() {
        let help = BotStrings::get().help_for("tarjima_bot", Some(Language::ENGLISH));
        for placeholder in ["{bot}", "{quick}", "{language}"] {
            assert!(!help.contains(placeholder), "left {}", placeholder);
        }
        assert!(help.contains("<code>@tarjima_bot ru Salom</code>"));
    }

    #[test]
    fn test_help_names_the_configured_default_language() {
        let help = BotStrings::get().help_for("tarjima_bot", Some(Language::RUSSIAN));
        assert!(help.contains("standart tilga (🇷🇺 Rus tili)"));
        assert!(!help.contains("Ingliz tili)"));
    }

    #[test]
    fn test_help_without_fallback_requires_a_language() {
        let help = BotStrings::get().help_for("tarjima_bot", None);
        assert!(help.contains("Til kodi har doim birinchi so'z"));
        assert!(!help.contains("Tez tarjima"));
        assert!(!help.contains("{quick}"));
    }

    #[test]
    fn test_help_html_tags_are_balanced() {
        let strings = BotStrings::get();
        for help in [
            strings.help_for("b", Some(Language::ENGLISH)),
            strings.help_for("b", None),
        ] {
            for tag in ["b", "code", "i"] {
                let open = help.matches(&format!("<{}>", tag)).count();
                let close = help.matches(&format!("</{}>", tag)).count();
                assert_eq!(open, close, "unbalanced <{}>", tag);
            }
        }
    }

    #[test]
    fn test_no_user_facing_string_is_empty() {
        let s = BotStrings::get();
        for text in [
            s.usage_title,
            s.usage_description,
            s.usage_message,
            s.no_text_title,
            s.no_text_description,
            s.no_text_message,
            s.unknown_language_title,
            s.unknown_language_description,
            s.failure_title,
            s.failure_description,
            s.failure_message,
            s.combined_title,
            s.health_message,
        ] {
            assert!(!text.trim().is_empty());
        }
    }
}
