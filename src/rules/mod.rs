//////////////////////////////////////////////////////////////////////
// concrete substitution rules and a registry to look them up by name

use phf::phf_map;
use tracing::{debug, warn};

use crate::errors::*;
use crate::geometry::{Rhomb, Triangle};
use crate::rule::Rule;

pub mod penrose;
pub mod pinwheel;

// used for missing or unknown rule names
pub const DEFAULT_RULE: &str = penrose::NAME;

// family specific parameters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RuleOptions {
    pub pinwheel: Option<(i64, i64)>
}

// a rule of any shape
#[derive(Debug)]
pub enum Family {
    Rhomb(Rule<Rhomb>),
    Triangle(Rule<Triangle>)
}

impl Family {

    pub fn name(&self) -> &str {
        match self {
            Family::Rhomb(rule) => rule.name(),
            Family::Triangle(rule) => rule.name()
        }
    }

}

type FamilyFunc = fn(&RuleOptions) -> Result<Family>;

fn penrose_family(_options: &RuleOptions) -> Result<Family> {
    Ok(Family::Rhomb(penrose::rule()?))
}

fn pinwheel_family(options: &RuleOptions) -> Result<Family> {

    let rule = match options.pinwheel {
        Some((p, q)) => pinwheel::pinwheel_pq(p, q)?,
        None => pinwheel::rule()?
    };

    Ok(Family::Triangle(rule))

}

// lookup table matching rule names to constructors
static RULES: phf::Map<&'static str, FamilyFunc> = phf_map! {
    "Penrose-Rhomb" => penrose_family,
    "Pinwheel" => pinwheel_family,
};

pub fn names() -> Vec<&'static str> {

    let mut names: Vec<&'static str> = RULES.keys().cloned().collect();
    names.sort();
    names

}

// unknown or missing names get the default rule
pub fn lookup(name: Option<&str>, options: &RuleOptions) -> Result<Family> {

    let func = match name.and_then(|n| RULES.get(n)) {

        Some(func) => func,

        None => {

            if let Some(name) = name {
                warn!("rule \"{:}\" not found, expected one of: {{\"{:}\"}}, using {:}",
                      name, names().join("\", \""), DEFAULT_RULE);
            } else {
                debug!("no rule given, using {:}", DEFAULT_RULE);
            }

            match RULES.get(DEFAULT_RULE) {
                Some(func) => func,
                None => { bail!("default rule {:} is not registered", DEFAULT_RULE); }
            }

        }

    };

    func(options)

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn known_names() {

        assert_eq!(names(), vec!["Penrose-Rhomb", "Pinwheel"]);

        let family = lookup(Some("Pinwheel"), &RuleOptions::default()).unwrap();
        assert_eq!(family.name(), "Pinwheel");
        assert!(matches!(family, Family::Triangle(_)));

    }

    #[test]
    fn pinwheel_parameters() {

        let options = RuleOptions { pinwheel: Some((2, 3)) };

        let family = lookup(Some("Pinwheel"), &options).unwrap();
        assert_eq!(family.name(), "Pinwheel(2,3)");

        // parameters only matter for the pinwheel
        let family = lookup(Some("Penrose-Rhomb"), &options).unwrap();
        assert_eq!(family.name(), "Penrose-Rhomb");

    }

    #[test]
    fn unknown_names_fall_back() {

        for name in &[Some("Ammann-Beenker"), Some(""), None] {
            let family = lookup(*name, &RuleOptions::default()).unwrap();
            assert_eq!(family.name(), DEFAULT_RULE);
            assert!(matches!(family, Family::Rhomb(_)));
        }

    }

}
