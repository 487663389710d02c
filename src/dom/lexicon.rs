use serde::Deserialize;
use std::collections::HashSet;

/// Goal-parsing vocabulary used by the candidate scorer.
///
/// The defaults are tuned for menu-ordering sites. They are data, not code:
/// load a different lexicon (e.g. from a JSON config) to retarget the scorer
/// at another domain without touching the scoring weights.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GoalLexicon {
    /// Tokens dropped from the goal before keyword matching
    pub stop_words: HashSet<String>,

    /// Verbs and filler that describe the interaction rather than the
    /// target; matched at reduced weight
    pub action_words: HashSet<String>,

    /// Verbs that indicate the goal is picking one item among several
    pub selection_verbs: Vec<String>,

    /// Category nouns that earn the flat domain boost when present in both
    /// the goal and a candidate label
    pub food_categories: Vec<String>,
}

impl Default for GoalLexicon {
    fn default() -> Self {
        let stop_words = [
            "the", "a", "an", "to", "for", "of", "in", "on", "at", "by", "with", "from",
            "up", "about", "into", "through", "during", "before", "after", "above",
            "below", "over", "under", "between", "among", "is", "are", "was", "were",
            "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
            "would", "could", "should", "may", "might", "can", "must", "shall", "and",
            "or", "but", "nor", "so", "yet", "if", "than", "when", "where", "while",
            "how", "why", "what", "which", "who", "whom", "whose", "this", "that",
            "these", "those", "i", "you", "he", "she", "it", "we", "they", "him",
            "her", "us", "them", "my", "his", "its", "our", "their",
        ];
        let action_words = [
            "select", "choose", "pick", "click", "build", "your", "own", "option",
            "order", "get", "go", "find", "then", "me", "as", "type",
        ];
        Self {
            stop_words: stop_words.iter().map(|w| w.to_string()).collect(),
            action_words: action_words.iter().map(|w| w.to_string()).collect(),
            selection_verbs: vec!["select".to_string(), "choose".to_string(), "pick".to_string()],
            food_categories: vec![
                "bowl".to_string(),
                "burrito".to_string(),
                "taco".to_string(),
                "salad".to_string(),
                "quesadilla".to_string(),
                "chips".to_string(),
                "drink".to_string(),
                "kids meal".to_string(),
            ],
        }
    }
}

impl GoalLexicon {
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    pub fn is_action_word(&self, token: &str) -> bool {
        self.action_words.contains(token)
    }

    /// Whether the goal text asks to pick among items (a selection verb is
    /// present anywhere in the lower-cased goal).
    pub fn wants_selection(&self, goal_lower: &str) -> bool {
        self.selection_verbs.iter().any(|v| goal_lower.contains(v.as_str()))
    }

    /// Category nouns present in the lower-cased goal, in table order.
    pub fn categories_in<'a>(&'a self, goal_lower: &str) -> Vec<&'a str> {
        self.food_categories
            .iter()
            .map(String::as_str)
            .filter(|c| goal_lower.contains(*c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let lex = GoalLexicon::default();
        assert!(lex.is_stop_word("the"));
        assert!(!lex.is_stop_word("bowl"));
        assert!(lex.is_action_word("select"));
        assert!(!lex.is_action_word("veggies"));
    }

    #[test]
    fn test_selection_detection() {
        let lex = GoalLexicon::default();
        assert!(lex.wants_selection("select 'bowl' as the type of order"));
        assert!(lex.wants_selection("pick the nearest location"));
        assert!(!lex.wants_selection("type your zip code"));
    }

    #[test]
    fn test_categories_in_goal() {
        let lex = GoalLexicon::default();
        let cats = lex.categories_in("select a burrito bowl to build");
        assert_eq!(cats, vec!["bowl", "burrito"]);
        assert!(lex.categories_in("find a location").is_empty());
    }

    #[test]
    fn test_deserialize_override() {
        let json = r#"{
            "food_categories": ["sedan", "suv", "truck"],
            "selection_verbs": ["select", "configure"]
        }"#;
        let lex: GoalLexicon = serde_json::from_str(json).unwrap();
        // overridden tables replace the defaults, untouched ones keep them
        assert_eq!(lex.categories_in("configure the suv trim"), vec!["suv"]);
        assert!(lex.wants_selection("configure the suv trim"));
        assert!(lex.is_stop_word("the"));
    }
}
