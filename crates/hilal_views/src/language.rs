use hilal_core::DateWindow;
use serde::Serialize;

const ENGLISH_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const URDU_MONTHS: [&str; 12] = [
    "جنوری", "فروری", "مارچ", "اپریل", "مئی", "جون", "جولائی", "اگست", "ستمبر", "اکتوبر",
    "نومبر", "دسمبر",
];

/// Reading language of a view; picks its fixed strings and text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Urdu,
}

impl Language {
    pub fn from_urdu_flag(is_urdu: bool) -> Self {
        if is_urdu {
            Language::Urdu
        } else {
            Language::English
        }
    }

    pub fn is_urdu(self) -> bool {
        self == Language::Urdu
    }

    pub fn direction(self) -> &'static str {
        match self {
            Language::English => "ltr",
            Language::Urdu => "rtl",
        }
    }

    /// Placeholder for an empty grid slot.
    pub fn empty_slot(self) -> &'static str {
        match self {
            Language::English => "No article available",
            Language::Urdu => "کوئی مضمون دستیاب نہیں",
        }
    }

    pub fn no_articles(self) -> &'static str {
        match self {
            Language::English => "No articles available",
            Language::Urdu => "کوئی مضامین دستیاب نہیں",
        }
    }

    pub fn no_additional_articles(self) -> &'static str {
        match self {
            Language::English => "No additional articles",
            Language::Urdu => "مزید مضامین دستیاب نہیں",
        }
    }

    pub fn load_failed(self) -> &'static str {
        match self {
            Language::English => "Error fetching articles",
            Language::Urdu => "مضامین لوڈ کرنے میں مسئلہ پیش آیا",
        }
    }

    /// Month and year shown next to a section title, e.g. "April 2025".
    pub fn period_label(self, window: &DateWindow) -> String {
        let months = match self {
            Language::English => &ENGLISH_MONTHS,
            Language::Urdu => &URDU_MONTHS,
        };
        match (window.month() as usize)
            .checked_sub(1)
            .and_then(|index| months.get(index))
        {
            Some(month) => format!("{} {}", month, window.year()),
            None => window.to_string(),
        }
    }
}
