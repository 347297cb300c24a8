//! The class-based object model produced by schema analysis.
//!
//! The model is arena-style: `Model` owns flat vectors of concepts,
//! enumerations, primitive types and associations, and cross-references are
//! index newtypes. Everything serializes with `serde` so callers can dump the
//! graph in whatever format they need; the engine itself never persists it.

use serde::Serialize;

/// Name of the constraint expression language attached to every constraint.
pub const CONSTRAINT_LANGUAGE: &str = "OCL";

/// Index of a concept within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConceptId(usize);

/// Index of an enumeration within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EnumerationId(usize);

/// Index of a primitive type within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PrimitiveId(usize);

/// The fixed set of primitive types, interned lazily per model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Integer,
    Boolean,
    Date,
}

impl PrimitiveKind {
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "String",
            PrimitiveKind::Integer => "Integer",
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Date => "Date",
        }
    }
}

/// A primitive type owned by the model, created on first demand.
#[derive(Debug, Clone, Serialize)]
pub struct PrimitiveType {
    pub name: String,
}

/// Resolved type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeRef {
    Primitive(PrimitiveId),
    Enumeration(EnumerationId),
    Concept(ConceptId),
}

/// An attribute of a concept. The upper bound is implicitly 1.
#[derive(Debug, Clone, Serialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// 0 by default, raised to 1 when the owning schema lists the property
    /// as `required`.
    pub lower: u32,
}

/// A declarative validation constraint owned by a concept.
#[derive(Debug, Clone, Serialize)]
pub struct Constraint {
    /// Synthesized as `<concept>-<property>-<constraintKind>`.
    pub name: String,
    pub language: String,
    pub body: String,
}

/// Aggregation marker of an association end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    None,
    Shared,
}

/// Lower/upper cardinality bounds; `upper == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cardinality {
    pub lower: u32,
    pub upper: Option<u32>,
}

impl Cardinality {
    /// Exactly one.
    pub const ONE: Cardinality = Cardinality {
        lower: 1,
        upper: Some(1),
    };

    /// Zero or more.
    pub const ANY: Cardinality = Cardinality {
        lower: 0,
        upper: None,
    };
}

/// One end of an association.
#[derive(Debug, Clone, Serialize)]
pub struct AssociationEnd {
    pub name: String,
    pub composite: bool,
    pub aggregation: Aggregation,
    pub cardinality: Cardinality,
}

/// A directed relation between two concepts.
#[derive(Debug, Clone, Serialize)]
pub struct Association {
    pub source: ConceptId,
    pub target: ConceptId,
    pub source_end: AssociationEnd,
    pub target_end: AssociationEnd,
}

/// The model entity corresponding to a JSON Schema object type.
#[derive(Debug, Clone, Serialize)]
pub struct Concept {
    pub name: String,
    pub properties: Vec<Property>,
    pub constraints: Vec<Constraint>,
    /// Free-text annotations from `title`/`description`, formatted as
    /// `Title: …` and `Description: …`.
    pub comments: Vec<String>,
    /// Set by reference resolution only; `None` until then.
    pub superclass: Option<ConceptId>,
}

impl Concept {
    fn new(name: String) -> Self {
        Concept {
            name,
            properties: Vec::new(),
            constraints: Vec::new(),
            comments: Vec::new(),
            superclass: None,
        }
    }

    /// Look up an owned property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Look up an owned constraint by name.
    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }
}

/// The root container owning all concepts, enumerations, primitive types and
/// associations discovered in one analysis run.
///
/// A model is created once per run with a caller-supplied name and mutated
/// throughout analysis; mutators are crate-private, so once the analyzer hands
/// the model over it is read-only. The `Unknown` placeholder concept is
/// created at initialization and substituted wherever a reference never
/// resolves; use [`Model::is_unknown`] to detect it.
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    name: String,
    concepts: Vec<Concept>,
    enumerations: Vec<Enumeration>,
    primitives: Vec<PrimitiveType>,
    associations: Vec<Association>,
    unknown: ConceptId,
}

/// A model-owned enumeration referenced by exactly one property.
#[derive(Debug, Clone, Serialize)]
pub struct Enumeration {
    pub name: String,
    /// Insertion order preserved, no deduplication.
    pub literals: Vec<String>,
}

impl Model {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        let mut model = Model {
            name: name.into(),
            concepts: Vec::new(),
            enumerations: Vec::new(),
            primitives: Vec::new(),
            associations: Vec::new(),
            unknown: ConceptId(0),
        };
        model.unknown = model.create_concept("Unknown");
        model
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The placeholder concept substituted for unresolved references.
    pub fn unknown(&self) -> ConceptId {
        self.unknown
    }

    pub fn is_unknown(&self, id: ConceptId) -> bool {
        id == self.unknown
    }

    pub(crate) fn create_concept(&mut self, name: impl Into<String>) -> ConceptId {
        let id = ConceptId(self.concepts.len());
        self.concepts.push(Concept::new(name.into()));
        id
    }

    pub fn concept(&self, id: ConceptId) -> &Concept {
        &self.concepts[id.0]
    }

    pub(crate) fn concept_mut(&mut self, id: ConceptId) -> &mut Concept {
        &mut self.concepts[id.0]
    }

    pub fn concepts(&self) -> impl Iterator<Item = (ConceptId, &Concept)> {
        self.concepts
            .iter()
            .enumerate()
            .map(|(i, c)| (ConceptId(i), c))
    }

    /// Look up a concept by name. Scans in creation order, so when two
    /// concepts share a name the earlier one wins here; name collisions in
    /// the analyzer's oracle resolve the other way (last write wins).
    pub fn concept_named(&self, name: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.name == name)
    }

    pub(crate) fn create_enumeration(
        &mut self,
        name: impl Into<String>,
        literals: Vec<String>,
    ) -> EnumerationId {
        let id = EnumerationId(self.enumerations.len());
        self.enumerations.push(Enumeration {
            name: name.into(),
            literals,
        });
        id
    }

    pub fn enumeration(&self, id: EnumerationId) -> &Enumeration {
        &self.enumerations[id.0]
    }

    pub fn enumerations(&self) -> impl Iterator<Item = &Enumeration> {
        self.enumerations.iter()
    }

    pub fn enumeration_named(&self, name: &str) -> Option<&Enumeration> {
        self.enumerations.iter().find(|e| e.name == name)
    }

    /// Return the primitive type for `kind`, creating it on first demand.
    /// Unique per name within the model.
    pub(crate) fn primitive(&mut self, kind: PrimitiveKind) -> PrimitiveId {
        let name = kind.name();
        match self.primitives.iter().position(|p| p.name == name) {
            Some(i) => PrimitiveId(i),
            None => {
                let id = PrimitiveId(self.primitives.len());
                self.primitives.push(PrimitiveType {
                    name: name.to_string(),
                });
                id
            }
        }
    }

    pub fn primitive_type(&self, id: PrimitiveId) -> &PrimitiveType {
        &self.primitives[id.0]
    }

    pub fn primitives(&self) -> impl Iterator<Item = &PrimitiveType> {
        self.primitives.iter()
    }

    pub(crate) fn add_association(&mut self, association: Association) {
        self.associations.push(association);
    }

    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    /// Associations whose source is the given concept.
    pub fn associations_of(&self, id: ConceptId) -> impl Iterator<Item = &Association> {
        self.associations.iter().filter(move |a| a.source == id)
    }

    /// The display name of a property's resolved type.
    pub fn type_name(&self, ty: TypeRef) -> &str {
        match ty {
            TypeRef::Primitive(id) => &self.primitive_type(id).name,
            TypeRef::Enumeration(id) => &self.enumeration(id).name,
            TypeRef::Concept(id) => &self.concept(id).name,
        }
    }
}
