// src/classify.rs
use std::fmt;

/// Default label for anything that is not a recognised absence or outing.
pub const OFFICE_LABEL: &str = "내근";
pub const TRIP_LABEL: &str = "출장";

// Markers matched literally against the schedule type
const VACATION_MARKERS: &[&str] = &["연차", "반차", "휴가"];
const TRIP_MARKERS: &[&str] = &["출장"];
const OUTSIDE_MARKERS: &[&str] = &["외근", "미팅"];
const INTERIOR_MARKERS: &[&str] = &["내근"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Office,
    Vacation,
    Trip,
    Outside,
    Interior,
}

impl Category {
    /// CSS class carried by the rendered status label.
    pub fn css_class(self) -> &'static str {
        match self {
            Category::Office => "office",
            Category::Vacation => "vacation",
            Category::Trip => "trip",
            Category::Outside => "outside",
            Category::Interior => "interior",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub label: String,
}

// --- Rule Table ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Empty,
    ContainsAny(&'static [&'static str]),
    Always,
}

impl Predicate {
    fn matches(self, entry_type: &str) -> bool {
        match self {
            Predicate::Empty => entry_type.is_empty(),
            Predicate::ContainsAny(markers) => markers.iter().any(|m| entry_type.contains(m)),
            Predicate::Always => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelTemplate {
    /// A fixed label regardless of the input
    Fixed(&'static str),
    /// The type string as written, with an optional decorative prefix
    Verbatim { prefix: &'static str },
}

impl LabelTemplate {
    fn render(self, entry_type: &str) -> String {
        match self {
            LabelTemplate::Fixed(label) => label.to_string(),
            LabelTemplate::Verbatim { prefix } => format!("{}{}", prefix, entry_type),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub predicate: Predicate,
    pub category: Category,
    pub label: LabelTemplate,
}

/// Label flavour. `Decorated` prefixes vacation and outing labels with an emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    #[default]
    Plain,
    Decorated,
}

impl LabelStyle {
    fn vacation_prefix(self) -> &'static str {
        match self {
            LabelStyle::Plain => "",
            LabelStyle::Decorated => "☀️ ",
        }
    }

    fn outside_prefix(self) -> &'static str {
        match self {
            LabelStyle::Plain => "",
            LabelStyle::Decorated => "📍 ",
        }
    }
}

/// Ordered rule evaluation; the first matching rule wins. Every rule set ends
/// with an `Always` fallback, so classification is total.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// empty -> vacation -> trip -> outside -> interior -> office
    pub fn standard(style: LabelStyle) -> Self {
        let mut rules = Self::absence_and_outing_rules(style);
        rules.insert(
            rules.len() - 1,
            Rule {
                predicate: Predicate::ContainsAny(INTERIOR_MARKERS),
                category: Category::Interior,
                label: LabelTemplate::Verbatim { prefix: "" },
            },
        );
        Self::from_rules(rules)
    }

    /// The single-entry board's rules: no interior rule, so "내근" types fall
    /// through to the office default.
    pub fn legacy() -> Self {
        Self::from_rules(Self::absence_and_outing_rules(LabelStyle::Decorated))
    }

    /// Appends the office fallback when no rule matches unconditionally.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        let mut rules = rules;
        if !rules.iter().any(|r| r.predicate == Predicate::Always) {
            rules.push(Self::office_fallback());
        }
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn classify(&self, entry_type: &str) -> Classification {
        let rule = self
            .rules
            .iter()
            .find(|rule| rule.predicate.matches(entry_type))
            .copied()
            .unwrap_or_else(Self::office_fallback);

        Classification {
            category: rule.category,
            label: rule.label.render(entry_type),
        }
    }

    fn absence_and_outing_rules(style: LabelStyle) -> Vec<Rule> {
        vec![
            Rule {
                predicate: Predicate::Empty,
                category: Category::Office,
                label: LabelTemplate::Fixed(OFFICE_LABEL),
            },
            Rule {
                predicate: Predicate::ContainsAny(VACATION_MARKERS),
                category: Category::Vacation,
                label: LabelTemplate::Verbatim {
                    prefix: style.vacation_prefix(),
                },
            },
            Rule {
                predicate: Predicate::ContainsAny(TRIP_MARKERS),
                category: Category::Trip,
                label: LabelTemplate::Fixed(TRIP_LABEL),
            },
            Rule {
                predicate: Predicate::ContainsAny(OUTSIDE_MARKERS),
                category: Category::Outside,
                label: LabelTemplate::Verbatim {
                    prefix: style.outside_prefix(),
                },
            },
            Self::office_fallback(),
        ]
    }

    fn office_fallback() -> Rule {
        Rule {
            predicate: Predicate::Always,
            category: Category::Office,
            label: LabelTemplate::Fixed(OFFICE_LABEL),
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::standard(LabelStyle::Plain)
    }
}
