//! Goal-aware candidate scoring.
//!
//! Each detected element already carries a structural base score from the
//! detector. This pass adds a keyword boost derived from the automation
//! goal: target keywords (what to act on) weigh 3.0 per match, action words
//! (how to act) 0.5, tripled when the node carries structured menu/tracking
//! metadata, plus a flat category boost for selection goals that name a
//! menu category. Pure, order-preserving, and deterministic: candidate ids
//! assigned afterwards are reproducible for identical input.

use crate::dom::element::Element;
use crate::dom::lexicon::GoalLexicon;

/// Attributes that mark a node as structured menu/tracking metadata;
/// a keyword match on such a node is far more trustworthy
pub const HIGH_VALUE_ATTRS: [&str; 6] = [
    "data-qa-group-name",
    "data-qa-item-name",
    "data-menu-item",
    "data-item-name",
    "data-testid",
    "data-track",
];

const TARGET_WEIGHT: f64 = 3.0;
const ACTION_WEIGHT: f64 = 0.5;
const HIGH_VALUE_MULTIPLIER: f64 = 3.0;
const CATEGORY_BOOST: f64 = 6.0;

const TOKEN_PUNCTUATION: [char; 15] =
    ['.', ',', '!', '?', ';', ':', '"', '\'', '(', ')', '[', ']', '{', '}', '`'];

/// Goal keywords split into what-to-act-on vs how-to-act vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalKeywords {
    pub targets: Vec<String>,
    pub actions: Vec<String>,
}

/// Tokenize the goal: whitespace split, lower-case, strip surrounding
/// punctuation, drop short tokens and stop words, then partition by the
/// lexicon's action-word table.
pub fn goal_keywords(goal: &str, lexicon: &GoalLexicon) -> GoalKeywords {
    let mut targets = Vec::new();
    let mut actions = Vec::new();

    for word in goal.split_whitespace() {
        let token = word.trim_matches(TOKEN_PUNCTUATION.as_slice()).to_lowercase();
        if token.chars().count() < 2 || lexicon.is_stop_word(&token) {
            continue;
        }
        if lexicon.is_action_word(&token) {
            actions.push(token);
        } else {
            targets.push(token);
        }
    }

    GoalKeywords { targets, actions }
}

/// Add the goal boost to every element's structural score, in place.
/// Order-preserving; one output per input; `candidate_id` stays unset.
pub fn score_elements(elements: &mut [Element], goal: &str, lexicon: &GoalLexicon) {
    let goal_lower = goal.to_lowercase();
    let keywords = goal_keywords(&goal_lower, lexicon);

    // the flat category boost only fires for selection goals
    let categories = if lexicon.wants_selection(&goal_lower) {
        lexicon.categories_in(&goal_lower)
    } else {
        Vec::new()
    };

    for element in elements.iter_mut() {
        element.score += goal_boost(element, &keywords, &categories);
    }
}

fn goal_boost(element: &Element, keywords: &GoalKeywords, categories: &[&str]) -> f64 {
    let label = element.text.to_lowercase();

    let target_matches = keywords.targets.iter().filter(|kw| label.contains(kw.as_str())).count();
    let general_matches = keywords.actions.iter().filter(|kw| label.contains(kw.as_str())).count();

    let mut boost = target_matches as f64 * TARGET_WEIGHT + general_matches as f64 * ACTION_WEIGHT;

    if HIGH_VALUE_ATTRS.iter().any(|attr| element.attrs.contains_key(*attr)) {
        boost *= HIGH_VALUE_MULTIPLIER;
    }

    // exact domain-vocabulary match, independent of the keyword weighting
    let category_matches = categories.iter().filter(|c| label.contains(*c)).count();
    boost + category_matches as f64 * CATEGORY_BOOST
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> GoalLexicon {
        GoalLexicon::default()
    }

    #[test]
    fn test_goal_tokenization() {
        let kw = goal_keywords("Select the 'Build Your Own' option for a bowl.", &lexicon());
        assert_eq!(kw.targets, vec!["bowl"]);
        assert_eq!(kw.actions, vec!["select", "build", "your", "own", "option"]);
    }

    #[test]
    fn test_short_tokens_and_stop_words_dropped() {
        let kw = goal_keywords("go to the menu, then pick a taco", &lexicon());
        assert_eq!(kw.targets, vec!["menu", "taco"]);
        assert_eq!(kw.actions, vec!["go", "then", "pick"]);
    }

    #[test]
    fn test_target_and_action_weighting() {
        let mut elements = vec![
            Element::new("div").with_text("Build Your Own"),
            Element::new("div").with_text("Lifestyle Bowl"),
        ];
        score_elements(&mut elements, "Select the 'Build Your Own' option for a bowl", &lexicon());

        // three action-word matches at 0.5 each
        assert_eq!(elements[0].score, 1.5);
        // one target match at 3.0 plus the +6.0 category boost on "bowl"
        assert_eq!(elements[1].score, 9.0);
    }

    #[test]
    fn test_high_value_attribute_multiplier() {
        let mut elements = vec![
            Element::new("div").with_text("Burrito Bowl"),
            Element::new("div")
                .with_text("Burrito Bowl")
                .with_attr("data-qa-group-name", "Burrito Bowl"),
        ];
        score_elements(&mut elements, "Select the Burrito Bowl option.", &lexicon());

        // targets: burrito, bowl -> 6.0; category boost: burrito + bowl -> 12.0
        assert_eq!(elements[0].score, 6.0 + 12.0);
        // the multiplier applies to the keyword boost only, not the category boost
        assert_eq!(elements[1].score, 6.0 * 3.0 + 12.0);
    }

    #[test]
    fn test_domain_goal_boost_needs_selection_verb() {
        let mut with_verb = vec![Element::new("div").with_text("Burrito Bowl")];
        let mut without_verb = with_verb.clone();

        score_elements(&mut with_verb, "Select 'Bowl' as the type of order you want to build.", &lexicon());
        score_elements(&mut without_verb, "Read about the bowl", &lexicon());

        // at least the flat +6.0 above what plain keyword overlap yields
        assert!(with_verb[0].score >= without_verb[0].score + 6.0);
    }

    #[test]
    fn test_structural_score_is_preserved() {
        let mut elements = vec![Element::new("button").with_text("Checkout").with_score(1.8)];
        score_elements(&mut elements, "click checkout", &lexicon());
        assert_eq!(elements[0].score, 1.8 + 3.0);
    }

    #[test]
    fn test_order_preserving_and_deterministic() {
        let build = || {
            vec![
                Element::new("a").with_text("Menu"),
                Element::new("div").with_text("Burrito Bowl"),
                Element::new("button").with_text("Order Now"),
            ]
        };
        let goal = "Select a burrito bowl";

        let mut first = build();
        let mut second = build();
        score_elements(&mut first, goal, &lexicon());
        score_elements(&mut second, goal, &lexicon());

        assert_eq!(first, second);
        let labels: Vec<&str> = first.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(labels, vec!["Menu", "Burrito Bowl", "Order Now"]);
        assert!(first.iter().all(|e| e.candidate_id.is_none()));
    }

    #[test]
    fn test_empty_goal_adds_nothing() {
        let mut elements = vec![Element::new("button").with_text("Order Now").with_score(2.3)];
        score_elements(&mut elements, "", &lexicon());
        assert_eq!(elements[0].score, 2.3);
    }
}
