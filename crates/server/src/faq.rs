//! Frequently asked questions served by the FAQ page.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQ: &[FaqEntry] = &[
    FaqEntry {
        question: "What is the purpose of this movie recommender system app?",
        answer: "The app aims to provide personalized movie recommendations \
                 based on user preferences.",
    },
    FaqEntry {
        question: "How does the app suggest movies?",
        answer: "The app uses a sophisticated algorithm that analyzes your \
                 watching history, ratings and preferences to suggest movies \
                 that you might enjoy.",
    },
    FaqEntry {
        question: "Are the recommendations always accurate?",
        answer: "While our algorithm strives to provide accurate and relevant \
                 recommendations, movie preferences are subjective. You might \
                 not enjoy every suggested movie, but we constantly learn from \
                 your feedback to improve future recommendations.",
    },
    FaqEntry {
        question: "Is the app available on multiple devices?",
        answer: "Yes, the app is designed to be accessible across various \
                 devices, including smartphones, tablets, and computers. You \
                 can seamlessly switch between devices and continue where you \
                 left off.",
    },
    FaqEntry {
        question: "Can I provide feedback or report issues?",
        answer: "Absolutely! We encourage users to provide feedback and report \
                 any issues they encounter. You can reach out to our support \
                 team through the app or our website.",
    },
];
