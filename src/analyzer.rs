//! Schema analysis - walks JSON Schema documents and builds the object model.
//!
//! Analysis is two-phased. The walk creates concepts, properties,
//! enumerations and constraints as it goes, registering every concept in the
//! oracle; references to concepts that may not exist yet (superclasses via
//! `allOf` + `$ref`, association targets via `$ref`) are recorded as deferred
//! entries. [`Analyzer::finish`] resolves the deferred entries against the
//! oracle once the whole batch has been analyzed, which is what makes
//! forward and cross-file references work regardless of input order.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::AnalyzeError;
use crate::loader::{collect_input_files, load_document};
use crate::model::{
    Aggregation, Association, AssociationEnd, Cardinality, ConceptId, Constraint, Model,
    PrimitiveKind, Property, TypeRef, CONSTRAINT_LANGUAGE,
};
use crate::uri::SchemaUri;

/// Analyze a file or directory of JSON Schema documents into a model.
///
/// Convenience wrapper over [`Analyzer`] for the common single-batch case.
///
/// # Errors
///
/// Returns `AnalyzeError` for IO failures, invalid JSON, a root object
/// without a string `id`, or an `id` that isn't a valid URI.
pub fn analyze(path: &Path, model_name: &str) -> Result<Model, AnalyzeError> {
    let mut analyzer = Analyzer::new(model_name);
    analyzer.analyze_path(path)?;
    Ok(analyzer.finish())
}

/// Recognized shapes of a root (or definition) schema node.
enum RootShape<'a> {
    /// `type == "object"`, analyzed as a concept.
    Object,
    /// No `type` but a `definitions` member: each entry is an independent
    /// named schema node.
    Definitions(&'a Map<String, Value>),
    /// Anything else is currently unsupported and silently skipped.
    Unsupported,
}

impl<'a> RootShape<'a> {
    fn classify(node: &'a Map<String, Value>) -> Self {
        match node.get("type").and_then(Value::as_str) {
            Some("object") => RootShape::Object,
            Some(_) => RootShape::Unsupported,
            None => match node.get("definitions").and_then(Value::as_object) {
                Some(defs) => RootShape::Definitions(defs),
                None => RootShape::Unsupported,
            },
        }
    }
}

/// Recognized shapes of a property subschema.
enum PropertyShape<'a> {
    /// `enum` alongside a `type`: becomes a model-owned enumeration.
    Enumerated(&'a Vec<Value>),
    /// `type == "string"`.
    Text,
    /// `type == "integer"` or `"number"`.
    Numeric,
    /// `type == "boolean"`.
    Flag,
    /// `type == "array"`: recognized but not yet mapped.
    Sequence,
    /// `type == "object"`: an inline nested concept.
    Nested,
    /// No `type`, a `$ref` pointer: a deferred association.
    Reference(&'a str),
    /// Anything else (`oneOf`, ...) is intentionally unhandled.
    Unsupported,
}

impl<'a> PropertyShape<'a> {
    fn classify(node: &'a Map<String, Value>) -> Self {
        if let Some(ty) = node.get("type").and_then(Value::as_str) {
            if let Some(values) = node.get("enum").and_then(Value::as_array) {
                return PropertyShape::Enumerated(values);
            }
            return match ty {
                "string" => PropertyShape::Text,
                "integer" | "number" => PropertyShape::Numeric,
                "boolean" => PropertyShape::Flag,
                "array" => PropertyShape::Sequence,
                "object" => PropertyShape::Nested,
                _ => PropertyShape::Unsupported,
            };
        }
        if let Some(pointer) = node.get("$ref").and_then(Value::as_str) {
            return PropertyShape::Reference(pointer);
        }
        PropertyShape::Unsupported
    }
}

/// A superclass reference waiting for its target to become known.
struct PendingSuperclass {
    target_name: String,
    subclass: ConceptId,
}

/// An association whose target is expressed only by a `$ref` pointer.
struct PendingAssociation {
    target_name: String,
    owner: ConceptId,
    source_end: AssociationEnd,
    target_end: AssociationEnd,
}

/// One analysis run: the model under construction, the oracle, and the
/// deferred-reference records.
///
/// Construct a fresh `Analyzer` per run; nothing is shared across runs. Feed
/// it documents with [`analyze_path`](Analyzer::analyze_path) /
/// [`analyze_value`](Analyzer::analyze_value), then call
/// [`finish`](Analyzer::finish) to resolve references and take the model.
/// `finish` consumes the analyzer, so resolution runs exactly once per batch
/// by construction.
///
/// When two documents digest to the same concept name, the later one wins in
/// the oracle; both concepts stay in the model.
pub struct Analyzer {
    model: Model,
    /// Name -> concept index over everything created so far.
    oracle: HashMap<String, ConceptId>,
    pending_superclasses: Vec<PendingSuperclass>,
    pending_associations: Vec<PendingAssociation>,
}

impl Analyzer {
    pub fn new(model_name: &str) -> Self {
        Analyzer {
            model: Model::new(model_name),
            oracle: HashMap::new(),
            pending_superclasses: Vec::new(),
            pending_associations: Vec::new(),
        }
    }

    /// Analyze a file, or every direct child file of a directory.
    ///
    /// Directory traversal is deliberately single-level; subdirectories are
    /// ignored. Children are visited in name order so cross-file references
    /// resolve the same way on every platform.
    pub fn analyze_path(&mut self, path: &Path) -> Result<(), AnalyzeError> {
        if path.is_file() {
            self.analyze_file(path)
        } else if path.is_dir() {
            for file in collect_input_files(path)? {
                self.analyze_file(&file)?;
            }
            Ok(())
        } else {
            Err(AnalyzeError::InvalidInput {
                path: path.to_path_buf(),
            })
        }
    }

    /// Load one JSON document and analyze it.
    pub fn analyze_file(&mut self, path: &Path) -> Result<(), AnalyzeError> {
        let document = load_document(path)?;
        self.analyze_value(&document)
    }

    /// Analyze one parsed JSON document.
    ///
    /// The root must be an object carrying a string `id`; the concept name
    /// for the document is digested from that id's URI path.
    pub fn analyze_value(&mut self, document: &Value) -> Result<(), AnalyzeError> {
        let root = document.as_object().ok_or(AnalyzeError::MissingId)?;
        let id = root
            .get("id")
            .and_then(Value::as_str)
            .ok_or(AnalyzeError::MissingId)?;
        let uri = SchemaUri::parse(id)?;
        let name = uri.digest_id_name().to_string();
        self.analyze_schema_node(&name, root);
        Ok(())
    }

    /// Resolve deferred references and hand over the model.
    ///
    /// Superclasses are resolved first, then associations; both phases only
    /// read the oracle, so the order is not observable. A reference whose
    /// target was never created resolves to the `Unknown` placeholder.
    pub fn finish(mut self) -> Model {
        for pending in std::mem::take(&mut self.pending_superclasses) {
            let found = self.lookup_or_unknown(&pending.target_name);
            self.model.concept_mut(pending.subclass).superclass = Some(found);
        }
        for pending in std::mem::take(&mut self.pending_associations) {
            let target = self.lookup_or_unknown(&pending.target_name);
            self.model.add_association(Association {
                source: pending.owner,
                target,
                source_end: pending.source_end,
                target_end: pending.target_end,
            });
        }
        self.model
    }

    fn lookup_or_unknown(&self, name: &str) -> ConceptId {
        self.oracle
            .get(name)
            .copied()
            .unwrap_or_else(|| self.model.unknown())
    }

    fn analyze_schema_node(&mut self, name: &str, node: &Map<String, Value>) {
        match RootShape::classify(node) {
            RootShape::Object => {
                self.analyze_object(name, node);
            }
            RootShape::Definitions(defs) => {
                // Definitions become their own concepts, named by key.
                for (key, definition) in defs {
                    if let Some(obj) = definition.as_object() {
                        self.analyze_schema_node(key, obj);
                    }
                }
            }
            RootShape::Unsupported => {}
        }
    }

    /// Analyze an object node as a concept named `name`.
    fn analyze_object(&mut self, name: &str, node: &Map<String, Value>) -> ConceptId {
        let concept_id = self.model.create_concept(name);
        // Registered before properties so a concept can reference itself.
        self.oracle.insert(name.to_string(), concept_id);

        if let Some(title) = node.get("title").and_then(Value::as_str) {
            self.model
                .concept_mut(concept_id)
                .comments
                .push(format!("Title: {title}"));
        }
        if let Some(description) = node.get("description").and_then(Value::as_str) {
            self.model
                .concept_mut(concept_id)
                .comments
                .push(format!("Description: {description}"));
        }

        if let Some(all_of) = node.get("allOf").and_then(Value::as_array) {
            for element in all_of {
                let Some(element) = element.as_object() else {
                    continue;
                };
                if let Some(pointer) = element.get("$ref").and_then(Value::as_str) {
                    // A $ref inside allOf names this concept's superclass.
                    self.pending_superclasses.push(PendingSuperclass {
                        target_name: reference_name(pointer).to_string(),
                        subclass: concept_id,
                    });
                } else if let Some(properties) = element.get("properties").and_then(Value::as_object)
                {
                    self.analyze_properties(concept_id, properties);
                }
            }
        } else if let Some(properties) = node.get("properties").and_then(Value::as_object) {
            self.analyze_properties(concept_id, properties);
        }

        if let Some(required) = node.get("required").and_then(Value::as_array) {
            for entry in required {
                let Some(required_name) = entry.as_str() else {
                    continue;
                };
                // Names with no matching property are ignored.
                let concept = self.model.concept_mut(concept_id);
                if let Some(property) = concept
                    .properties
                    .iter_mut()
                    .find(|p| p.name == required_name)
                {
                    property.lower = 1;
                }
            }
        }

        concept_id
    }

    fn analyze_properties(&mut self, owner: ConceptId, properties: &Map<String, Value>) {
        for (name, subschema) in properties {
            if let Some(node) = subschema.as_object() {
                self.analyze_property(owner, name, node);
            }
        }
    }

    fn analyze_property(&mut self, owner: ConceptId, name: &str, node: &Map<String, Value>) {
        match PropertyShape::classify(node) {
            PropertyShape::Enumerated(values) => {
                let literals = values.iter().map(literal_text).collect();
                let enumeration = self.model.create_enumeration(format!("{name}Enum"), literals);
                self.add_property(owner, name, TypeRef::Enumeration(enumeration));
            }
            PropertyShape::Text => {
                let kind = match node.get("format").and_then(Value::as_str) {
                    Some("date-time") => PrimitiveKind::Date,
                    _ => PrimitiveKind::String,
                };
                let primitive = self.model.primitive(kind);
                self.add_property(owner, name, TypeRef::Primitive(primitive));
                if let Some(max) = node.get("maxLength") {
                    let body = format!("self.{name}.size() <= {}", literal_text(max));
                    self.add_constraint(owner, name, "maxLengthConstraint", body);
                }
                if let Some(min) = node.get("minLength") {
                    let body = format!("self.{name}.size() >= {}", literal_text(min));
                    self.add_constraint(owner, name, "minLengthConstraint", body);
                }
                // pattern is a defined non-goal
            }
            PropertyShape::Numeric => {
                let primitive = self.model.primitive(PrimitiveKind::Integer);
                self.add_property(owner, name, TypeRef::Primitive(primitive));
                if let Some(value) = node.get("multipleOf") {
                    let body = format!("self.{name}.div({}) = 0", literal_text(value));
                    self.add_constraint(owner, name, "multipleOfConstraint", body);
                }
                if let Some(value) = node.get("maximum") {
                    let body = format!("self.{name} <= {}", literal_text(value));
                    self.add_constraint(owner, name, "maximumConstraint", body);
                }
                if let Some(value) = node.get("exclusiveMaximum") {
                    let body = format!("self.{name} < {}", literal_text(value));
                    self.add_constraint(owner, name, "exclusiveMaximumConstraint", body);
                }
                if let Some(value) = node.get("minimum") {
                    let body = format!("self.{name} >= {}", literal_text(value));
                    self.add_constraint(owner, name, "minimumConstraint", body);
                }
                if let Some(value) = node.get("exclusiveMinimum") {
                    let body = format!("self.{name} > {}", literal_text(value));
                    self.add_constraint(owner, name, "exclusiveMinimumConstraint", body);
                }
            }
            PropertyShape::Flag => {
                let primitive = self.model.primitive(PrimitiveKind::Boolean);
                self.add_property(owner, name, TypeRef::Primitive(primitive));
            }
            PropertyShape::Sequence => {
                // Array item schemas are not mapped yet.
            }
            PropertyShape::Nested => {
                // The nested object becomes its own concept; the property is
                // expressed as a composite association, not as an attribute.
                let owner_name = self.model.concept(owner).name.clone();
                let target = self.analyze_object(&capitalize(name), node);
                self.model.add_association(Association {
                    source: owner,
                    target,
                    source_end: AssociationEnd {
                        name: name.to_string(),
                        composite: true,
                        aggregation: Aggregation::None,
                        cardinality: Cardinality::ANY,
                    },
                    target_end: AssociationEnd {
                        name: owner_name,
                        composite: false,
                        aggregation: Aggregation::None,
                        cardinality: Cardinality::ONE,
                    },
                });
            }
            PropertyShape::Reference(pointer) => {
                let target_name = reference_name(pointer).to_string();
                self.pending_associations.push(PendingAssociation {
                    owner,
                    source_end: AssociationEnd {
                        name: name.to_string(),
                        composite: true,
                        aggregation: Aggregation::None,
                        cardinality: Cardinality::ANY,
                    },
                    target_end: AssociationEnd {
                        name: target_name.clone(),
                        composite: false,
                        aggregation: Aggregation::None,
                        cardinality: Cardinality::ONE,
                    },
                    target_name,
                });
            }
            PropertyShape::Unsupported => {}
        }
    }

    fn add_property(&mut self, owner: ConceptId, name: &str, ty: TypeRef) {
        self.model.concept_mut(owner).properties.push(Property {
            name: name.to_string(),
            ty,
            lower: 0,
        });
    }

    fn add_constraint(&mut self, owner: ConceptId, property: &str, kind: &str, body: String) {
        let concept = self.model.concept_mut(owner);
        let name = format!("{}-{}-{}", concept.name, property, kind);
        concept.constraints.push(Constraint {
            name,
            language: CONSTRAINT_LANGUAGE.to_string(),
            body,
        });
    }
}

/// The referenced concept's name: the final `/`-segment of a `$ref` pointer.
fn reference_name(pointer: &str) -> &str {
    pointer.rsplit('/').next().unwrap_or(pointer)
}

/// Render a schema value exactly as written, without numeric normalization.
fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reference_name_takes_final_segment() {
        assert_eq!(reference_name("#/definitions/address"), "address");
        assert_eq!(reference_name("address"), "address");
    }

    #[test]
    fn literal_text_keeps_schema_literals() {
        assert_eq!(literal_text(&json!(10)), "10");
        assert_eq!(literal_text(&json!(2.5)), "2.5");
        assert_eq!(literal_text(&json!("5")), "5");
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("address"), "Address");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn root_without_id_errors() {
        let mut analyzer = Analyzer::new("test");
        let result = analyzer.analyze_value(&json!({ "type": "object" }));
        assert!(matches!(result, Err(AnalyzeError::MissingId)));
    }

    #[test]
    fn non_object_root_errors() {
        let mut analyzer = Analyzer::new("test");
        let result = analyzer.analyze_value(&json!(["not", "an", "object"]));
        assert!(matches!(result, Err(AnalyzeError::MissingId)));
    }

    #[test]
    fn invalid_id_uri_errors() {
        let mut analyzer = Analyzer::new("test");
        let result = analyzer.analyze_value(&json!({
            "id": "no-scheme-here",
            "type": "object"
        }));
        assert!(matches!(result, Err(AnalyzeError::InvalidUri(_))));
    }

    #[test]
    fn unsupported_root_shape_is_skipped() {
        let mut analyzer = Analyzer::new("test");
        analyzer
            .analyze_value(&json!({
                "id": "foo://example.com/things/thing.json",
                "type": "string"
            }))
            .unwrap();
        let model = analyzer.finish();
        // Only the Unknown placeholder exists.
        assert_eq!(model.concepts().count(), 1);
    }

    #[test]
    fn oracle_collision_last_write_wins() {
        let mut analyzer = Analyzer::new("test");
        for _ in 0..2 {
            analyzer
                .analyze_value(&json!({
                    "id": "foo://example.com/thing/schema.json",
                    "type": "object",
                    "properties": { "att": { "type": "boolean" } }
                }))
                .unwrap();
        }
        analyzer
            .analyze_value(&json!({
                "id": "foo://example.com/other/schema.json",
                "type": "object",
                "properties": {
                    "link": { "$ref": "#/definitions/thing" }
                }
            }))
            .unwrap();
        let model = analyzer.finish();

        // Both "thing" concepts exist in the model.
        let things = model.concepts().filter(|(_, c)| c.name == "thing").count();
        assert_eq!(things, 2);

        // The association resolved against the later entry.
        let association = &model.associations()[0];
        assert_eq!(model.concept(association.target).name, "thing");
        assert!(!model.is_unknown(association.target));
    }

    #[test]
    fn self_reference_resolves() {
        let mut analyzer = Analyzer::new("test");
        analyzer
            .analyze_value(&json!({
                "id": "foo://example.com/node/schema.json",
                "type": "object",
                "properties": {
                    "next": { "$ref": "#/definitions/node" }
                }
            }))
            .unwrap();
        let model = analyzer.finish();

        let association = &model.associations()[0];
        assert_eq!(model.concept(association.source).name, "node");
        assert_eq!(association.source, association.target);
    }
}
