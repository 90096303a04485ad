// Materialized resource graphs.
//
// A `Resource` is the in-memory form of one remote entity: its wire
// attributes plus relations resolved from the document's `included`
// sideloads. Relations an `included` entry doesn't cover stay as
// identifier-only stubs. The graph is fully owned, so `Clone` is a
// structural deep copy and mutating a clone never touches the original.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::context::RequestContext;
use crate::error::Error;
use crate::wire::{
    Document, PrimaryData, Relationship, RelationshipData, ResourceIdentifier, ResourceObject,
};

/// Attribute carrying the owning tenancy's id.
const TENANCY_ATTRIBUTE: &str = "tenancy_id";

/// One remote entity instance, with relations materialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    kind: String,
    id: Option<String>,
    attributes: serde_json::Map<String, Value>,
    relations: BTreeMap<String, Relation>,
}

/// A materialized relation value.
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    One(Box<Resource>),
    Many(Vec<Resource>),
}

/// Tenancy-sharing classification of a resource relative to the
/// current session's tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sharing {
    /// Belongs to the selected tenancy (or no tenancy is selected).
    Owned,
    /// Belongs to an ancestor of the selected tenancy.
    Inherited,
    /// Belongs to some other tenancy that shares it with this one.
    Shared,
}

impl Resource {
    /// A fresh resource for building a create payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Server-assigned identifier. Immutable once set.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    pub fn attributes(&self) -> &serde_json::Map<String, Value> {
        &self.attributes
    }

    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.get(name)
    }

    /// The single related resource under `name`, if that relation is
    /// present and singular.
    pub fn related_one(&self, name: &str) -> Option<&Resource> {
        match self.relations.get(name) {
            Some(Relation::One(r)) => Some(r),
            _ => None,
        }
    }

    /// The related collection under `name`; empty when absent or singular.
    pub fn related_many(&self, name: &str) -> &[Resource] {
        match self.relations.get(name) {
            Some(Relation::Many(rs)) => rs,
            _ => &[],
        }
    }

    pub fn set_relation(&mut self, name: impl Into<String>, value: Relation) {
        self.relations.insert(name.into(), value);
    }

    // ── Typed attribute accessors ────────────────────────────────────
    //
    // The backend is loose about numeric vs string encoding, so these
    // degrade to None instead of erroring on shape mismatches.

    pub fn attr_str(&self, name: &str) -> Option<String> {
        match self.attributes.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn attr_f64(&self, name: &str) -> Option<f64> {
        match self.attributes.get(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn attr_i64(&self, name: &str) -> Option<i64> {
        match self.attributes.get(name)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn attr_bool(&self, name: &str) -> Option<bool> {
        match self.attributes.get(name)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|v| v != 0),
            _ => None,
        }
    }

    // ── Dotted-path access ───────────────────────────────────────────

    /// Resolve a dotted path like `"item.itemGroup.description"` by
    /// walking singular relations, then reading the final segment as an
    /// attribute (`"id"` reads the identifier). Unresolvable paths
    /// degrade to `None` rather than erroring.
    pub fn value_at(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.').peekable();
        let mut current = self;

        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                if segment == "id" {
                    return current.id.clone().map(Value::String);
                }
                return current.attributes.get(segment).cloned();
            }
            current = current.related_one(segment)?;
        }
        None
    }

    // ── Tenancy sharing ──────────────────────────────────────────────

    /// Classify this resource against the context's tenant and its
    /// ancestor chain. Degrades to `Owned` when the resource carries no
    /// tenancy attribute or no tenant is selected.
    pub fn sharing(&self, ctx: &RequestContext) -> Sharing {
        let Some(own) = self.attr_str(TENANCY_ATTRIBUTE) else {
            return Sharing::Owned;
        };
        let Some(ref current) = ctx.tenant_id else {
            return Sharing::Owned;
        };
        if own == *current {
            Sharing::Owned
        } else if ctx.parent_tenants.iter().any(|p| *p == own) {
            Sharing::Inherited
        } else {
            Sharing::Shared
        }
    }

    pub fn is_inherited(&self, ctx: &RequestContext) -> bool {
        self.sharing(ctx) == Sharing::Inherited
    }

    pub fn is_shared(&self, ctx: &RequestContext) -> bool {
        self.sharing(ctx) == Sharing::Shared
    }

    pub fn is_inherited_or_shared(&self, ctx: &RequestContext) -> bool {
        self.sharing(ctx) != Sharing::Owned
    }

    // ── Wire conversion ──────────────────────────────────────────────

    /// Flatten back into a wire object (used for create payloads).
    pub fn to_object(&self) -> ResourceObject {
        ResourceObject {
            kind: self.kind.clone(),
            id: self.id.clone(),
            attributes: self.attributes.clone(),
            relationships: Default::default(),
        }
    }
}

// ── Materialization ──────────────────────────────────────────────────

/// Materialize a singular document into one resource.
pub fn materialize_one(doc: &Document) -> Result<Resource, Error> {
    match doc.data {
        PrimaryData::One(ref obj) => Ok(resolve_object(obj, &doc.included, &mut Vec::new())),
        PrimaryData::Many(_) | PrimaryData::Null => Err(Error::Deserialization {
            message: "expected a single resource in `data`".into(),
            body: String::new(),
        }),
    }
}

/// Materialize a plural document, preserving input order. Null or empty
/// `data` yields an empty vec.
pub fn materialize_many(doc: &Document) -> Result<Vec<Resource>, Error> {
    match doc.data {
        PrimaryData::Many(ref rows) => Ok(rows
            .iter()
            .map(|obj| resolve_object(obj, &doc.included, &mut Vec::new()))
            .collect()),
        PrimaryData::Null => Ok(Vec::new()),
        PrimaryData::One(_) => Err(Error::Deserialization {
            message: "expected a resource array in `data`".into(),
            body: String::new(),
        }),
    }
}

/// Plural materialization for endpoints that embed a collection of raw
/// resource objects under a named attribute on each row (e.g. movement
/// lines inside a stock movement). The embedded array is materialized
/// against `included` and re-attached as a `Many` relation of the same
/// name; the raw attribute is removed.
pub fn materialize_many_embedded(doc: &Document, field: &str) -> Result<Vec<Resource>, Error> {
    let mut rows = materialize_many(doc)?;
    for row in &mut rows {
        let Some(raw) = row.attributes.remove(field) else {
            continue;
        };
        let objects: Vec<ResourceObject> =
            serde_json::from_value(raw.clone()).map_err(|e| Error::Deserialization {
                message: format!("embedded `{field}` is not a resource array: {e}"),
                body: raw.to_string(),
            })?;
        let nested = objects
            .iter()
            .map(|obj| resolve_object(obj, &doc.included, &mut Vec::new()))
            .collect();
        row.set_relation(field, Relation::Many(nested));
    }
    Ok(rows)
}

/// Resolve a bare identifier into a live resource: the full included
/// representation when sideloaded, an identifier-only stub otherwise.
pub fn resolve_identifier(ident: &ResourceIdentifier, included: &[ResourceObject]) -> Resource {
    resolve_identifier_inner(ident, included, &mut Vec::new())
}

fn resolve_identifier_inner(
    ident: &ResourceIdentifier,
    included: &[ResourceObject],
    in_progress: &mut Vec<ResourceIdentifier>,
) -> Resource {
    // Cycle guard: an included resource referencing an ancestor in the
    // current resolution path becomes a stub instead of recursing.
    if in_progress.contains(ident) {
        return stub(ident);
    }
    match included
        .iter()
        .find(|obj| obj.kind == ident.kind && obj.id.as_deref() == Some(&ident.id))
    {
        Some(obj) => {
            in_progress.push(ident.clone());
            let resolved = resolve_object(obj, included, in_progress);
            in_progress.pop();
            resolved
        }
        None => stub(ident),
    }
}

fn resolve_object(
    obj: &ResourceObject,
    included: &[ResourceObject],
    in_progress: &mut Vec<ResourceIdentifier>,
) -> Resource {
    let mut relations = BTreeMap::new();
    for (name, rel) in &obj.relationships {
        let Some(resolved) = resolve_relationship(rel, included, in_progress) else {
            continue;
        };
        relations.insert(name.clone(), resolved);
    }
    Resource {
        kind: obj.kind.clone(),
        id: obj.id.clone(),
        attributes: obj.attributes.clone(),
        relations,
    }
}

fn resolve_relationship(
    rel: &Relationship,
    included: &[ResourceObject],
    in_progress: &mut Vec<ResourceIdentifier>,
) -> Option<Relation> {
    match rel.data.as_ref()? {
        RelationshipData::One(ident) => Some(Relation::One(Box::new(resolve_identifier_inner(
            ident,
            included,
            in_progress,
        )))),
        RelationshipData::Many(idents) => Some(Relation::Many(
            idents
                .iter()
                .map(|ident| resolve_identifier_inner(ident, included, in_progress))
                .collect(),
        )),
    }
}

fn stub(ident: &ResourceIdentifier) -> Resource {
    Resource {
        kind: ident.kind.clone(),
        id: Some(ident.id.clone()),
        attributes: Default::default(),
        relations: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn items_doc() -> Document {
        serde_json::from_value(json!({
            "data": [
                {
                    "type": "items",
                    "id": "1",
                    "attributes": { "description": "Drill", "tenancy_id": "42" },
                    "relationships": {
                        "itemGroup": { "data": { "type": "item-groups", "id": "9" } },
                    },
                },
                { "type": "items", "id": "2", "attributes": { "description": "Hammer" } },
            ],
            "included": [
                { "type": "item-groups", "id": "9", "attributes": { "description": "Power tools" } },
            ],
        }))
        .unwrap()
    }

    #[test]
    fn plural_materialization_preserves_order() {
        let rows = materialize_many(&items_doc()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id(), Some("1"));
        assert_eq!(rows[1].id(), Some("2"));
    }

    #[test]
    fn empty_and_null_data_yield_empty_vec() {
        let doc: Document = serde_json::from_value(json!({ "data": [] })).unwrap();
        assert!(materialize_many(&doc).unwrap().is_empty());

        let doc: Document = serde_json::from_value(json!({ "data": null })).unwrap();
        assert!(materialize_many(&doc).unwrap().is_empty());
    }

    #[test]
    fn included_relations_are_resolved() {
        let rows = materialize_many(&items_doc()).unwrap();
        let group = rows[0].related_one("itemGroup").unwrap();
        assert_eq!(group.id(), Some("9"));
        assert_eq!(group.attr_str("description").as_deref(), Some("Power tools"));
    }

    #[test]
    fn missing_included_entry_becomes_stub() {
        let doc: Document = serde_json::from_value(json!({
            "data": {
                "type": "items",
                "id": "1",
                "relationships": {
                    "manufacturer": { "data": { "type": "manufacturers", "id": "77" } },
                },
            },
        }))
        .unwrap();
        let item = materialize_one(&doc).unwrap();
        let maker = item.related_one("manufacturer").unwrap();
        assert_eq!(maker.id(), Some("77"));
        assert!(maker.attributes().is_empty());
    }

    #[test]
    fn cyclic_includes_terminate() {
        let doc: Document = serde_json::from_value(json!({
            "data": {
                "type": "tenancies",
                "id": "a",
                "relationships": { "parent": { "data": { "type": "tenancies", "id": "b" } } },
            },
            "included": [
                {
                    "type": "tenancies",
                    "id": "b",
                    "relationships": { "parent": { "data": { "type": "tenancies", "id": "a" } } },
                },
                {
                    "type": "tenancies",
                    "id": "a",
                    "relationships": { "parent": { "data": { "type": "tenancies", "id": "b" } } },
                },
            ],
        }))
        .unwrap();
        let root = materialize_one(&doc).unwrap();
        let parent = root.related_one("parent").unwrap();
        assert_eq!(parent.id(), Some("b"));
        // The back-reference to "a" resolved as a stub, not a cycle.
        let grandparent = parent.related_one("parent").unwrap();
        assert_eq!(grandparent.id(), Some("a"));
        assert!(grandparent.relation("parent").is_none());
    }

    #[test]
    fn embedded_collection_becomes_relation() {
        let doc: Document = serde_json::from_value(json!({
            "data": [{
                "type": "stock-movements",
                "id": "5",
                "attributes": {
                    "direction": "entry",
                    "lines": [
                        { "type": "movement-lines", "id": "51", "attributes": { "quantity": 3 } },
                        { "type": "movement-lines", "id": "52", "attributes": { "quantity": 1 } },
                    ],
                },
            }],
        }))
        .unwrap();
        let rows = materialize_many_embedded(&doc, "lines").unwrap();
        assert!(rows[0].attribute("lines").is_none());
        let lines = rows[0].related_many("lines");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].attr_i64("quantity"), Some(3));
    }

    #[test]
    fn clone_is_independent_of_the_original() {
        let rows = materialize_many(&items_doc()).unwrap();
        let original = rows[0].clone();
        let mut copy = original.clone();

        copy.set_attribute("description", json!("Changed"));
        copy.set_relation(
            "itemGroup",
            Relation::One(Box::new(Resource::new("item-groups"))),
        );

        assert_eq!(original.attr_str("description").as_deref(), Some("Drill"));
        assert_eq!(
            original.related_one("itemGroup").unwrap().id(),
            Some("9"),
        );
    }

    #[test]
    fn value_at_walks_relations_and_reads_id() {
        let rows = materialize_many(&items_doc()).unwrap();
        assert_eq!(
            rows[0].value_at("itemGroup.description"),
            Some(json!("Power tools"))
        );
        assert_eq!(rows[0].value_at("itemGroup.id"), Some(json!("9")));
        assert_eq!(rows[0].value_at("id"), Some(json!("1")));
        assert_eq!(rows[0].value_at("itemGroup.missing.deep"), None);
        assert_eq!(rows[1].value_at("itemGroup.description"), None);
    }

    #[test]
    fn sharing_classification() {
        let rows = materialize_many(&items_doc()).unwrap();
        let item = &rows[0]; // tenancy_id = "42"

        let own = RequestContext::anonymous().with_tenant("42");
        assert_eq!(item.sharing(&own), Sharing::Owned);

        let child = RequestContext::anonymous()
            .with_tenant("99")
            .with_parent_tenants(vec!["42".into()]);
        assert_eq!(item.sharing(&child), Sharing::Inherited);
        assert!(item.is_inherited(&child));
        assert!(item.is_inherited_or_shared(&child));

        let unrelated = RequestContext::anonymous().with_tenant("7");
        assert_eq!(item.sharing(&unrelated), Sharing::Shared);
        assert!(item.is_shared(&unrelated));

        // No session -- degrade to Owned rather than erroring.
        assert_eq!(item.sharing(&RequestContext::anonymous()), Sharing::Owned);

        // No tenancy attribute on the resource at all.
        assert_eq!(rows[1].sharing(&unrelated), Sharing::Owned);
    }
}
