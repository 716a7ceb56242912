//! Monoid presentations: generators, relations, and order seeds.

use std::collections::BTreeSet;

use crate::reduce::Rule;

/// The identity symbol, always part of the alphabet.
pub const IDENTITY: char = '1';

/// A pomonoid presentation: a generator alphabet, the base relations shared
/// by a family of presentations, presentation-specific relations on top, and
/// optional order seed pairs `(greater, lesser)`.
///
/// The identity absorption rules (`11 -> 1` and `1g -> g`, `g1 -> g` for
/// every generator `g`) are installed automatically and count as base
/// relations.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Presentation {
    generators: BTreeSet<char>,
    base_relations: Vec<Rule>,
    relations: Vec<Rule>,
    order_pairs: Vec<(String, String)>,
}

impl Presentation {
    /// Creates a presentation over `generators` whose structural core is
    /// `base_relations`.
    pub fn new(generators: &[char], base_relations: &[(&str, &str)]) -> Self {
        let generators: BTreeSet<char> =
            generators.iter().copied().filter(|&g| g != IDENTITY).collect();

        let mut rules = vec![Rule::new(
            &format!("{IDENTITY}{IDENTITY}"),
            &IDENTITY.to_string(),
        )];

        for &generator in &generators {
            rules.push(Rule::new(
                &format!("{IDENTITY}{generator}"),
                &generator.to_string(),
            ));
            rules.push(Rule::new(
                &format!("{generator}{IDENTITY}"),
                &generator.to_string(),
            ));
        }

        rules.extend(
            base_relations
                .iter()
                .map(|(pattern, replacement)| Rule::new(pattern, replacement)),
        );

        Self {
            generators,
            base_relations: rules,
            relations: Vec::new(),
            order_pairs: Vec::new(),
        }
    }

    /// The two-generator alphabet `{a, r}` with its structural relations
    /// `aaa -> a` and `rr -> r`, the base shared by the ring presentations.
    pub fn standard() -> Self {
        Self::new(&['a', 'r'], &[("aaa", "a"), ("rr", "r")])
    }

    /// Adds presentation-specific relations.
    pub fn with_relations(mut self, relations: &[(&str, &str)]) -> Self {
        self.relations.extend(
            relations
                .iter()
                .map(|(pattern, replacement)| Rule::new(pattern, replacement)),
        );

        self
    }

    /// Adds order seed pairs, each meaning `greater >= lesser`.
    pub fn with_order(mut self, pairs: &[(&str, &str)]) -> Self {
        self.order_pairs.extend(
            pairs
                .iter()
                .map(|(greater, lesser)| ((*greater).to_owned(), (*lesser).to_owned())),
        );

        self
    }

    /// The generator alphabet, in symbol order, without the identity.
    pub fn generators(&self) -> impl Iterator<Item = char> + '_ {
        self.generators.iter().copied()
    }

    /// The presentation-specific relations, without the base.
    pub fn relations(&self) -> impl Iterator<Item = &Rule> {
        self.relations.iter()
    }

    /// The declared order seed pairs.
    pub fn order_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order_pairs
            .iter()
            .map(|(greater, lesser)| (greater.as_str(), lesser.as_str()))
    }

    pub(crate) fn generator_list(&self) -> Vec<char> {
        self.generators.iter().copied().collect()
    }

    pub(crate) fn base_rules(&self) -> Vec<Rule> {
        self.base_relations.clone()
    }

    /// The full rewrite rule set: base relations (identity absorption
    /// included) followed by the presentation-specific relations.
    pub fn rules(&self) -> Vec<Rule> {
        let mut rules = self.base_relations.clone();
        rules.extend(self.relations.iter().cloned());

        rules
    }

    /// Whether two presentations can enter a product together: same alphabet
    /// and same base relations, so generating words mean the same thing on
    /// both sides.
    pub(crate) fn compatible_with(&self, other: &Self) -> bool {
        self.generators == other.generators
            && {
                let mut ours: Vec<_> = self.base_relations.clone();
                let mut theirs: Vec<_> = other.base_relations.clone();
                ours.sort();
                theirs.sort();
                ours == theirs
            }
    }

    /// A presentation with this one's alphabet and base, whose extra
    /// relations are the congruences discovered by a product construction.
    pub(crate) fn exported(&self, relations: Vec<Rule>) -> Self {
        Self {
            generators: self.generators.clone(),
            base_relations: self.base_relations.clone(),
            relations,
            order_pairs: Vec::new(),
        }
    }
}
