//! Entity category codes
//!
//! The recognizer tags candidates with two-letter codes: the first letter is the family
//! (`g` geography, `i` institutions, `m` media, `n` numbers, `o` artifacts, `p` persons,
//! `t` time, `a` addresses), the second the category. `_` marks an underspecified category.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const ENTITY_CODES: &[(&str, &str)] = &[
    ("ah", "street numbers"),
    ("at", "phone/fax numbers"),
    ("az", "zip codes"),
    ("gc", "states"),
    ("gh", "hydronyms"),
    ("gl", "nature areas / objects"),
    ("gq", "urban parts"),
    ("gr", "territorial names"),
    ("gs", "streets, squares"),
    ("gt", "continents"),
    ("gu", "cities/towns"),
    ("g_", "underspecified geographical name"),
    ("ia", "conferences/contests"),
    ("ic", "cult./educ./scient. inst."),
    ("if", "companies, concerns..."),
    ("io", "government/political inst."),
    ("i_", "underspecified institutions"),
    ("me", "email address"),
    ("mi", "internet links"),
    ("mn", "periodical"),
    ("ms", "radio and TV stations"),
    ("na", "age"),
    ("nb", "vol./page/chap./sec./fig. numbers"),
    ("nc", "cardinal numbers"),
    ("ni", "itemizer"),
    ("no", "ordinal numbers"),
    ("ns", "sport score"),
    ("n_", "underspecified number expression"),
    ("oa", "cultural artifacts (books, movies)"),
    ("oe", "measure units"),
    ("om", "currency units"),
    ("op", "products"),
    ("or", "directives, norms"),
    ("o_", "underspecified artifact name"),
    ("pc", "inhabitant names"),
    ("pd", "(academic) titles"),
    ("pf", "first names"),
    ("pm", "second names"),
    ("pp", "relig./myth persons"),
    ("ps", "surnames"),
    ("p_", "underspecified personal name"),
    ("td", "days"),
    ("tf", "feasts"),
    ("th", "hours"),
    ("tm", "months"),
    ("ty", "years"),
];

static DESCRIPTIONS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ENTITY_CODES.iter().copied().collect());

/// Human description of an entity code.
pub fn describe(code: &str) -> Option<&'static str> {
    DESCRIPTIONS.get(code).copied()
}

/// Description for display: unknown codes are shown as they are.
pub fn display_name(code: &str) -> &str {
    describe(code).unwrap_or(code)
}
