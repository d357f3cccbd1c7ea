//! Keyword-driven canned replies.
//!
//! Input is lowercased and tested against an ordered rule table; the first
//! rule with a matching pattern decides the reply. Every reply exists in an
//! Indonesian and an English variant, picked by [`Language::detect`].

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::error::{ChatError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Indonesian,
    English,
}

const INDONESIAN_MARKERS: &[&str] = &[
    "apa", "bagaimana", "gimana", "siapa", "kapan", "dimana", "mengapa", "kenapa", "mereka",
    "bertemu", "kenal", "kenalan", "kencan", "pertama", "halo", "hai", "kabar", "terima",
    "kasih", "makasih", "tentang", "ceritakan", "cerita", "yang", "dan", "mulai", "jalan",
    "berdua", "momen", "spesial", "kenangan", "kepribadian", "sifat", "masa", "depan",
    "rencana", "jadian", "resmi", "hubungan", "bisa", "saya", "aku", "kamu", "anda", "tolong",
];

impl Language {
    pub fn detect(input: &str) -> Self {
        let lower = input.to_lowercase();
        if words(&lower).any(|w| INDONESIAN_MARKERS.contains(&w)) {
            Language::Indonesian
        } else {
            Language::English
        }
    }
}

fn words(lower: &str) -> impl Iterator<Item = &str> {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Greeting,
    Wellbeing,
    Capabilities,
    Thanks,
    HowTheyMet,
    FirstDate,
    StartedDating,
    SpecialMoments,
    Personality,
    Future,
    BecameOfficial,
    Relationship,
    Fallback,
}

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Contains(&'static str),
    Word(&'static str),
}

impl Pattern {
    fn matches(self, lower: &str) -> bool {
        match self {
            Pattern::Contains(needle) => lower.contains(needle),
            Pattern::Word(word) => words(lower).any(|w| w == word),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Localized {
    id: &'static str,
    en: &'static str,
}

impl Localized {
    fn get(self, lang: Language) -> &'static str {
        match lang {
            Language::Indonesian => self.id,
            Language::English => self.en,
        }
    }
}

#[derive(Debug)]
enum Reply {
    Fixed(Localized),
    OneOf(&'static [Localized]),
}

struct Rule {
    topic: Topic,
    patterns: &'static [Pattern],
    reply: Reply,
}

impl Rule {
    fn matches(&self, lower: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(lower))
    }
}

use Pattern::{Contains, Word};

const RELATIONSHIP_REPLIES: &[Localized] = &[
    Localized {
        id: "Vyone dan Hubertus memiliki kisah cinta yang sangat indah! Mereka bertemu di kampus dan sekarang menjalani hubungan yang penuh kasih sayang. Ada aspek khusus dari hubungan mereka yang ingin Anda ketahui lebih lanjut?",
        en: "Vyone and Hubertus have a truly beautiful love story! They met on campus and are now in a relationship full of affection. Is there a particular part of their relationship you'd like to know more about?",
    },
    Localized {
        id: "Hubungan Vyone dan Hubertus dibangun atas dasar saling pengertian dan kasih sayang. Mereka selalu mendukung satu sama lain dalam setiap langkah. Apa yang ingin Anda ketahui tentang mereka?",
        en: "Vyone and Hubertus built their relationship on mutual understanding and affection. They support each other every step of the way. What would you like to know about them?",
    },
    Localized {
        id: "Kisah cinta Vyone dan Hubertus dimulai dari pertemuan sederhana di kampus dan berkembang menjadi hubungan yang sangat indah. Mereka adalah contoh pasangan yang saling melengkapi. Ada yang spesifik yang ingin Anda tanyakan?",
        en: "Vyone and Hubertus' love story began with a simple meeting on campus and grew into a wonderful relationship. They are a couple who truly complete each other. Is there something specific you'd like to ask?",
    },
];

const FALLBACK_REPLY: Localized = Localized {
    id: "Saya khusus membantu menjawab pertanyaan tentang kisah cinta Vyone dan Hubertus. Anda bisa bertanya tentang bagaimana mereka bertemu, kencan pertama, momen spesial, kepribadian mereka, atau rencana masa depan mereka. Ada yang ingin Anda ketahui tentang kisah cinta mereka? 💕",
    en: "I'm here specifically to answer questions about Vyone and Hubertus' love story. You can ask how they met, about their first date, special moments, their personalities, or their plans for the future. What would you like to know about their story? 💕",
};

const ERROR_REPLY: Localized = Localized {
    id: "Maaf, saya mengalami kesalahan saat memproses pertanyaan Anda. Silakan coba lagi.",
    en: "Sorry, something went wrong while processing your question. Please try again.",
};

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule {
            topic: Topic::Greeting,
            patterns: &[Word("hi"), Word("hai"), Word("hey"), Contains("hello"), Contains("halo")],
            reply: Reply::Fixed(Localized {
                id: "Hai! Saya adalah asisten virtual yang siap membantu Anda dengan berbagai pertanyaan tentang kisah cinta Vyone dan Hubertus. Ada yang ingin Anda ketahui tentang mereka? 😊",
                en: "Hi! I'm a virtual assistant ready to help with any questions about Vyone and Hubertus' love story. Is there anything you'd like to know about them? 😊",
            }),
        },
        Rule {
            topic: Topic::Wellbeing,
            patterns: &[Contains("how are you"), Contains("apa kabar"), Contains("bagaimana kabar")],
            reply: Reply::Fixed(Localized {
                id: "Saya baik-baik saja, terima kasih! Saya selalu siap membantu Anda mengetahui lebih banyak tentang kisah cinta yang indah antara Vyone dan Hubertus. Ada yang ingin Anda tanyakan tentang mereka?",
                en: "I'm doing well, thank you! I'm always happy to help you learn more about the beautiful love story of Vyone and Hubertus. Is there anything you'd like to ask about them?",
            }),
        },
        Rule {
            topic: Topic::Capabilities,
            patterns: &[Contains("what can you do"), Contains("apa yang bisa"), Contains("kemampuan")],
            reply: Reply::Fixed(Localized {
                id: "Saya bisa membantu Anda dengan berbagai informasi tentang hubungan Vyone dan Hubertus! Saya bisa menceritakan tentang:\n\n• Bagaimana mereka bertemu\n• Kencan pertama mereka\n• Momen-momen spesial\n• Kepribadian mereka\n• Rencana masa depan\n• Dan masih banyak lagi!\n\nSilakan tanyakan apa saja yang ingin Anda ketahui tentang kisah cinta mereka! 💕",
                en: "I can tell you all sorts of things about Vyone and Hubertus' relationship! For example:\n\n• How they met\n• Their first date\n• Special moments\n• Their personalities\n• Plans for the future\n• And much more!\n\nAsk me anything you'd like to know about their love story! 💕",
            }),
        },
        Rule {
            topic: Topic::Thanks,
            patterns: &[Contains("thank"), Contains("terima kasih"), Contains("makasih")],
            reply: Reply::Fixed(Localized {
                id: "Sama-sama! Senang bisa membantu Anda mengetahui lebih banyak tentang kisah cinta Vyone dan Hubertus. Jangan ragu untuk bertanya lagi kapan saja! 😊",
                en: "You're welcome! Glad I could help you learn more about Vyone and Hubertus' love story. Feel free to ask again any time! 😊",
            }),
        },
        Rule {
            topic: Topic::HowTheyMet,
            patterns: &[Contains("bertemu"), Contains("meet"), Contains("kenal"), Contains("first met"), Contains("they met")],
            reply: Reply::Fixed(Localized {
                id: "Vyone dan Hubertus bertemu di Universitas Bina Nusantara saat semester 2. Pada saat kelas mata kuliah Calculus, Hubertus mengajak kenalan Vyone karena Vyone merupakan teman dari temannya Hubertus, yaitu Jeisen. Saat semester 2, mereka memang tidak banyak ngobrol. Dan ketika semester 3, mereka berada di 1 kelas yang sama lagi dan mulai dari tanggal 3 Oktober 2024 mereka chatting setiap hari sampai sekarang! 💕",
                en: "Vyone and Hubertus met at Bina Nusantara University in their second semester. During a Calculus class, Hubertus introduced himself to Vyone, since she was a friend of his friend Jeisen. They didn't talk much that semester. In the third semester they ended up in the same class again, and since October 3, 2024 they have chatted every single day! 💕",
            }),
        },
        Rule {
            topic: Topic::FirstDate,
            patterns: &[Contains("first date"), Contains("kencan pertama"), Contains("date pertama")],
            reply: Reply::Fixed(Localized {
                id: "Ketika mereka sudah jadian pada tanggal 15 Mei 2025, mereka Date di Mall of Alam Sutera (walaupun hampir setiap hari mereka dating dan main di sana). Tempat yang sangat spesial bagi mereka berdua! 🌹",
                en: "Once they became a couple on May 15, 2025, they had their date at Mall of Alam Sutera (even though they hang out there almost every day). A very special place for both of them! 🌹",
            }),
        },
        Rule {
            topic: Topic::StartedDating,
            patterns: &[Contains("started dating"), Contains("start dating"), Contains("mulai jalan"), Contains("jalan berdua")],
            reply: Reply::Fixed(Localized {
                id: "Pertama kali mereka pergi jalan berdua adalah pada tanggal 7 Februari 2025, dimana mereka pergi ke Jakarta untuk makan bareng di restoran bernama Nagabi di Citra 8, Jakarta Barat. Momen yang sangat berkesan untuk mereka berdua! 📅",
                en: "The first time they went out together was on February 7, 2025, when they went to Jakarta to eat at a restaurant called Nagabi in Citra 8, West Jakarta. A truly memorable moment for both of them! 📅",
            }),
        },
        Rule {
            topic: Topic::SpecialMoments,
            patterns: &[Contains("special moment"), Contains("momen spesial"), Contains("kenangan"), Contains("memories")],
            reply: Reply::Fixed(Localized {
                id: "Mereka memiliki banyak momen spesial! Salah satunya adalah pada tanggal 24 Maret 2025, mereka pergi ke Lippo Mall Puri berdua untuk bermain bareng. Dan ada juga pada tanggal 25 April 2025, mereka pergi bareng ke PIK (Pantai Indah Kapuk) untuk bermain bersama hingga malam hari. Setiap momen bersama adalah spesial bagi mereka! ✨",
                en: "They have lots of special moments! One was on March 24, 2025, when they went to Lippo Mall Puri together to hang out. Another was on April 25, 2025, when they went to PIK (Pantai Indah Kapuk) and stayed out until night. Every moment together is special to them! ✨",
            }),
        },
        Rule {
            topic: Topic::Personality,
            patterns: &[Contains("personalit"), Contains("kepribadian"), Contains("sifat")],
            reply: Reply::Fixed(Localized {
                id: "Hubertus adalah orang yang sangat penyabar, penyayang, dan pengertian terhadap pasangannya (Vyone). Vyone juga merupakan orang yang sangat baik hati dan juga penyayang terhadap pasangannya walaupun sedikit gampang cemburu dan tidak peka. Mereka saling melengkapi dengan sempurna! 🎭",
                en: "Hubertus is very patient, loving and understanding towards his partner, Vyone. Vyone is also very kind-hearted and loving towards her partner, even if she gets a little jealous easily and sometimes misses the hints. They complement each other perfectly! 🎭",
            }),
        },
        Rule {
            topic: Topic::Future,
            patterns: &[Contains("future"), Contains("masa depan"), Contains("rencana"), Contains("plans")],
            reply: Reply::Fixed(Localized {
                id: "Mereka ingin hubungan mereka berjalan dengan baik dan lancar sampai maut memisahkan. Mereka ingin selalu ada untuk satu sama lain dalam suka maupun duka, agar mereka bisa menjadi pasangan yang saling melengkapi. Mereka juga punya impian untuk menikah di Florida! 🔮💍",
                en: "They want their relationship to go well until death do them part. They want to always be there for each other in good times and bad, so they can keep completing each other. They also dream of getting married in Florida! 🔮💍",
            }),
        },
        Rule {
            topic: Topic::BecameOfficial,
            patterns: &[Contains("jadian"), Contains("official"), Contains("resmi"), Contains("became a couple")],
            reply: Reply::Fixed(Localized {
                id: "Mereka resmi menjadi pasangan pada tanggal 15 Mei 2025! Hari yang sangat berkesan dan menjadi awal dari perjalanan cinta mereka yang indah. 💕",
                en: "They officially became a couple on May 15, 2025! A very memorable day and the start of their beautiful journey together. 💕",
            }),
        },
        Rule {
            topic: Topic::Relationship,
            patterns: &[
                Contains("vyone"),
                Contains("hubertus"),
                Contains("mereka"),
                Contains("relationship"),
                Contains("hubungan"),
                Contains("couple"),
                Word("they"),
                Word("them"),
                Word("their"),
            ],
            reply: Reply::OneOf(RELATIONSHIP_REPLIES),
        },
    ]
});

/// Turns user input into a reply. Implementations may fail; the store
/// substitutes an apology when they do.
pub trait Responder: Send + Sync {
    fn respond(&self, input: &str, rng: &mut dyn RngCore) -> Result<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordResolver;

impl KeywordResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, input: &str) -> Topic {
        let lower = input.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.matches(&lower))
            .map(|rule| rule.topic)
            .unwrap_or(Topic::Fallback)
    }

    pub fn resolve(&self, input: &str, rng: &mut dyn RngCore) -> String {
        let lang = Language::detect(input);
        let lower = input.to_lowercase();
        let Some(rule) = RULES.iter().find(|rule| rule.matches(&lower)) else {
            return FALLBACK_REPLY.get(lang).to_string();
        };
        let reply = match &rule.reply {
            Reply::Fixed(text) => *text,
            Reply::OneOf(options) => *options.choose(rng).unwrap_or(&FALLBACK_REPLY),
        };
        reply.get(lang).to_string()
    }
}

impl Responder for KeywordResolver {
    fn respond(&self, input: &str, rng: &mut dyn RngCore) -> Result<String> {
        if input.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        Ok(self.resolve(input, rng))
    }
}

/// All generic relationship paragraphs for `lang`, in table order.
pub fn relationship_replies(lang: Language) -> Vec<&'static str> {
    RELATIONSHIP_REPLIES.iter().map(|r| r.get(lang)).collect()
}

pub fn fallback_reply(lang: Language) -> &'static str {
    FALLBACK_REPLY.get(lang)
}

/// Apology shown in place of a reply when the responder fails.
pub fn error_reply(lang: Language) -> &'static str {
    ERROR_REPLY.get(lang)
}

/// Fixed reply for `topic`, or `None` for the random and fallback branches.
pub fn fixed_reply(topic: Topic, lang: Language) -> Option<&'static str> {
    RULES.iter().find(|r| r.topic == topic).and_then(|r| match &r.reply {
        Reply::Fixed(text) => Some(text.get(lang)),
        Reply::OneOf(_) => None,
    })
}
