//! The fixed taxonomy of concern categories, their trigger keywords, and the
//! contact resource attached to each.
//!
//! Everything here is a compile-time constant; the lists are never mutated.

use std::fmt;

use serde::{Deserialize, Serialize};

const MENTAL_HEALTH_INDIA_URL: &str = "https://www.mentalhealthindia.net/";

/// A mental-health concern category.
///
/// Variants are declared in taxonomy order, which is also the order matched
/// categories are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Depression,
    Anxiety,
    Sadness,
    Loneliness,
    Stress,
    Anger,
    Burnout,
    #[serde(rename = "Self-Harm/Suicidal Thoughts")]
    SelfHarm,
}

/// A static contact resource bound to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// Who to contact, and how.
    pub contact: &'static str,
    /// Where to find more help.
    pub url: &'static str,
}

impl Category {
    /// Every category, in taxonomy order.
    pub const ALL: [Category; 8] = [
        Category::Depression,
        Category::Anxiety,
        Category::Sadness,
        Category::Loneliness,
        Category::Stress,
        Category::Anger,
        Category::Burnout,
        Category::SelfHarm,
    ];

    /// Display name of the category.
    pub fn name(self) -> &'static str {
        match self {
            Category::Depression => "Depression",
            Category::Anxiety => "Anxiety",
            Category::Sadness => "Sadness",
            Category::Loneliness => "Loneliness",
            Category::Stress => "Stress",
            Category::Anger => "Anger",
            Category::Burnout => "Burnout",
            Category::SelfHarm => "Self-Harm/Suicidal Thoughts",
        }
    }

    /// Position of the category in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase trigger keywords, in declaration order.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Depression => &["hopeless", "useless", "worthless", "empty", "lost", "numb", "fatigued", "drained", "unmotivated", "exhausted"],
            Category::Anxiety => &["worried", "nervous", "panic", "overwhelmed", "restless", "tense", "uneasy", "overthinking", "dizzy", "racing thoughts", "anxious"],
            Category::Sadness => &["lonely", "heartbroken", "disappointed", "crying", "upset", "sorrow", "unhappy", "down", "missing", "abandoned"],
            Category::Loneliness => &["alone", "isolated", "ignored", "misunderstood", "disconnected", "forgotten", "unwanted", "invisible", "left out", "empty"],
            Category::Stress => &["pressure", "overwhelmed", "exhausted", "burnout", "headache", "suffocating", "responsibilities", "workload", "breaking point", "tense"],
            Category::Anger => &["furious", "betrayed", "irritated", "frustrated", "rage", "unfair", "offended", "resentful", "yelling", "aggressive"],
            Category::Burnout => &["drained", "exhausted", "done", "can't anymore", "overworked", "detached", "unmotivated", "helpless", "fatigue", "numb"],
            Category::SelfHarm => &["die", "end it", "suicide", "cut", "harm", "death", "disappear", "no point", "nothing left", "burden"],
        }
    }

    /// The contact resource for the category, if it has one.
    pub fn resource(self) -> Option<Resource> {
        let (contact, url) = match self {
            Category::Depression => ("👨🏻‍⚕️ Dr. Rajesh Verma - +91 98765 43210", MENTAL_HEALTH_INDIA_URL),
            Category::Anxiety => ("👨🏻‍⚕️ Dr. Pooja Sharma - +91 91234 56789", MENTAL_HEALTH_INDIA_URL),
            Category::Sadness => ("👨🏻‍⚕️ Dr. Vikram Patel - +91 88990 11223", MENTAL_HEALTH_INDIA_URL),
            Category::Loneliness => ("👨🏻‍⚕️ Dr. Neha Gupta - +91 99887 77665", MENTAL_HEALTH_INDIA_URL),
            Category::Stress => ("👨🏻‍⚕️ Dr. Arjun Mehta - +91 90909 80808", MENTAL_HEALTH_INDIA_URL),
            Category::Anger => ("👨🏻‍⚕️ Dr. Anjali Deshmukh - +91 81234 56789", MENTAL_HEALTH_INDIA_URL),
            Category::Burnout => ("👨🏻‍⚕️ Dr. Ramesh Iyer - +91 92345 67890", MENTAL_HEALTH_INDIA_URL),
            Category::SelfHarm => ("Vandrevala Foundation Helpline - 1860 266 2345", "https://www.snehi.org/"),
        };

        Some(Resource { contact, url })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
