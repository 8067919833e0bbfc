//! Static user-facing text shown by the presentation shell.

/// Heading printed above each report.
pub const TITLE: &str = "🧠 MindMitra: Your Mental Health Therapist";

/// One-line description printed under the title in interactive mode.
pub const INTRO: &str = "This analyzer detects mental health issues from user input and suggests resources. (यह चैटबॉट उपयोगकर्ता इनपुट से मानसिक स्वास्थ्य समस्याओं का पता लगाता है और संसाधन सुझाता है।)";

/// Prompt shown before reading a submission in interactive mode.
pub const INPUT_PROMPT: &str = "💬Type your thoughts here: (कृपया अपनी भावनाएं यहाँ लिखें:)";

/// Shown instead of a category list when no keyword matched.
pub const NO_ISSUE_LABEL: &str = "No clear issue detected (कोई स्पष्ट समस्या नहीं मिली )👍";

/// Shown when a submission carries no text.
pub const EMPTY_INPUT_PROMPT: &str = "Please enter some text for analysis. (कृपया विश्लेषण के लिए कुछ पाठ दर्ज करें।)";

pub const CLASSIFICATION_HEADING: &str = "📝 Mental Health Classification (मानसिक स्वास्थ्य वर्गीकरण)";
pub const DETECTED_ISSUE_PREFIX: &str = "🔹 Detected Issue (पहचानी गई समस्या):";
pub const RESOURCES_HEADING: &str = "📌 Suggested Resources (सुझाए गए संसाधन):";
pub const HELP_LINK_LABEL: &str = "सहायता लिंक (Help Link)";
pub const EMOTION_HEADING: &str = "📊 Emotion Analysis (भावना विश्लेषण )";

/// Footer printed after every report.
pub const DISCLAIMER: &str = "💡 This chatbot is for informational purposes only. If you are in crisis, please seek professional help.";
