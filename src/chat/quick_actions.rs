use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub id: &'static str,
    pub label: &'static str,
    pub message: &'static str,
    pub icon: &'static str,
}

const FEATURED_COUNT: usize = 6;

const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction { id: "1", label: "How They Met", message: "Tell me about how Vyone and Hubertus first met", icon: "💕" },
    QuickAction { id: "2", label: "First Date", message: "What was their first date like?", icon: "🌹" },
    QuickAction { id: "3", label: "When They Started Dating", message: "When did Vyone and Hubertus officially start dating?", icon: "📅" },
    QuickAction { id: "4", label: "Special Moments", message: "What are some of their most special moments together?", icon: "✨" },
    QuickAction { id: "5", label: "Their Personalities", message: "Tell me about Vyone and Hubertus personalities and how they complement each other", icon: "🎭" },
    QuickAction { id: "6", label: "Future Plans", message: "What are their plans for the future together?", icon: "🔮" },
    QuickAction { id: "7", label: "Favorite Activities", message: "What do they love doing together?", icon: "🎯" },
    QuickAction { id: "8", label: "Travel Adventures", message: "Tell me about their travel experiences together", icon: "✈️" },
    QuickAction { id: "9", label: "Love Language", message: "How do they express love to each other?", icon: "💝" },
    QuickAction { id: "10", label: "Challenges Overcome", message: "What challenges have they overcome together?", icon: "💪" },
    QuickAction { id: "11", label: "Family & Friends", message: "How do their families and friends view their relationship?", icon: "👨‍👩‍👧‍👦" },
    QuickAction { id: "12", label: "Anniversary Celebrations", message: "How do they celebrate their anniversaries?", icon: "🎉" },
];

pub fn featured() -> &'static [QuickAction] {
    &QUICK_ACTIONS[..FEATURED_COUNT]
}

pub fn all() -> &'static [QuickAction] {
    QUICK_ACTIONS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::resolver::{KeywordResolver, Topic};

    #[test]
    fn featured_is_a_prefix_of_all() {
        assert_eq!(featured().len(), 6);
        assert_eq!(all().len(), 12);
        assert_eq!(featured(), &all()[..6]);
    }

    #[test]
    fn featured_prompts_hit_their_topics() {
        let resolver = KeywordResolver::new();
        let topics: Vec<Topic> = featured().iter().map(|a| resolver.classify(a.message)).collect();
        assert_eq!(
            topics,
            vec![
                Topic::HowTheyMet,
                Topic::FirstDate,
                Topic::StartedDating,
                Topic::SpecialMoments,
                Topic::Personality,
                Topic::Future,
            ]
        );
    }
}
