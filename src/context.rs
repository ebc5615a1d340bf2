use std::sync::Arc;

use crate::config::AutoFakerConfig;
use crate::faker::Faker;
use crate::generators::Generator;
use crate::many;
use crate::resolve::{self, GeneratorCache};
use crate::session::AutoFaker;
use crate::types::{Ty, TypeCatalog};
use crate::value::Value;

/// Per-request generation state.
///
/// Created once per top-level request and threaded by `&mut` through every
/// recursive call. `generate_type` changes while descending into nested
/// types; `target_type` stays what the caller asked for.
pub struct GenerationContext<'s> {
    session: &'s AutoFaker,
    target_type: Ty,
    generate_type: Ty,
    rule_sets: Vec<String>,
    instance: Option<Value>,
    faker: Faker,
    /// Object types currently being expanded, outermost first.
    expanding: Vec<Ty>,
}

impl<'s> GenerationContext<'s> {
    pub fn new(session: &'s AutoFaker, ty: Ty) -> Self {
        Self::with_faker(session, ty, Faker::new())
    }

    pub fn with_faker(session: &'s AutoFaker, ty: Ty, faker: Faker) -> Self {
        Self {
            session,
            target_type: ty.clone(),
            generate_type: ty,
            rule_sets: Vec::new(),
            instance: None,
            faker,
            expanding: Vec::new(),
        }
    }

    /// Restrict member population to these rule sets.
    pub fn rule_sets<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule_sets = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Populate an existing value in place instead of creating one.
    pub fn instance(mut self, value: Value) -> Self {
        self.instance = Some(value);
        self
    }

    pub fn target_type(&self) -> &Ty {
        &self.target_type
    }

    pub fn generate_type(&self) -> &Ty {
        &self.generate_type
    }

    pub fn set_generate_type(&mut self, ty: Ty) {
        self.generate_type = ty;
    }

    pub fn active_rule_sets(&self) -> &[String] {
        &self.rule_sets
    }

    pub fn current_instance(&self) -> Option<&Value> {
        self.instance.as_ref()
    }

    pub fn take_instance(&mut self) -> Option<Value> {
        self.instance.take()
    }

    pub fn set_instance(&mut self, value: Option<Value>) {
        self.instance = value;
    }

    pub fn config(&self) -> &'s AutoFakerConfig {
        self.session.config()
    }

    pub fn catalog(&self) -> &'s TypeCatalog {
        self.session.catalog()
    }

    pub fn cache(&self) -> &'s GeneratorCache {
        self.session.cache()
    }

    pub fn faker(&mut self) -> &mut Faker {
        &mut self.faker
    }

    /// The generator that would handle `generate_type` right now.
    pub fn resolve_generator(&self) -> Arc<dyn Generator> {
        resolve::resolve_generator(self)
    }

    /// Generate a value for the current `generate_type`.
    pub fn generate(&mut self) -> Value {
        let generator = self.resolve_generator();
        generator.generate(self)
    }

    /// Descend into `ty`, generate it, and restore the current position.
    pub fn generate_type_of(&mut self, ty: &Ty) -> Value {
        let outer_type = std::mem::replace(&mut self.generate_type, ty.clone());
        let outer_instance = self.instance.take();
        let value = self.generate();
        self.generate_type = outer_type;
        self.instance = outer_instance;
        value
    }

    /// Generate a batch of `element` values through the repeated-generation
    /// driver. `count = None` uses the configured repeat count.
    pub fn generate_many_of(&mut self, element: &Ty, count: Option<usize>, unique: bool) -> Vec<Value> {
        let mut items = Vec::new();
        many::generate_many(self, count, &mut items, unique, 0, |ctx| {
            ctx.generate_type_of(element)
        });
        items
    }

    /// Number of object expansions on the stack.
    pub fn depth(&self) -> usize {
        self.expanding.len()
    }

    /// Whether `ty` may be expanded once more without breaking the recursion
    /// bounds.
    ///
    /// Occurrences are counted per definition, ignoring generic arguments:
    /// `Node<i32>` and `Node<Vec<i32>>` share one budget, so a definition that
    /// refers to itself with growing arguments still terminates.
    pub fn can_expand(&self, ty: &Ty) -> bool {
        let config = self.config();
        if config.tree_depth().is_some_and(|max| self.expanding.len() >= max) {
            return false;
        }
        let occurrences = self
            .expanding
            .iter()
            .filter(|t| same_definition(t, ty))
            .count();
        occurrences < config.recursive_depth()
    }

    pub(crate) fn enter(&mut self, ty: &Ty) {
        self.expanding.push(ty.clone());
    }

    pub(crate) fn leave(&mut self) {
        self.expanding.pop();
    }
}

fn same_definition(a: &Ty, b: &Ty) -> bool {
    match (a, b) {
        (Ty::Named { name: x, .. }, Ty::Named { name: y, .. }) => x == y,
        _ => a == b,
    }
}
