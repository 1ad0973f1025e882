//! DTO → [`UnitOfSource`] conversion with validation.
//!
//! Nodes are pushed in document order: a declaration first, then its
//! annotations, then its parameters or members.

use super::dto::{
    AnnotationDto, CallableDto, EventDto, FieldDto, MemberDto, NamespaceDto, PropertyDto,
    TypeDto, UnitDto,
};
use super::SnapshotError;
use crate::semantic::{UnitBuilder, UnitOfSource};
use crate::symbols::{Accessibility, Modifier, Modifiers, PropertyFacts, Symbol, SymbolKind};
use crate::tree::{AccessorKind, NodeId, SyntaxKind};

/// Converts a `UnitDto` to a unit of source.
///
/// # Errors
///
/// Returns [`SnapshotError::Invalid`] for declarations no source could
/// produce (a field without variables, an event accessor on a property).
pub fn load(dto: UnitDto) -> Result<UnitOfSource, SnapshotError> {
    let mut builder = UnitBuilder::new(dto.path);
    builder.generated(dto.generated);
    let root = builder.root();
    for (i, member) in dto.members.iter().enumerate() {
        add_member(&mut builder, root, member, &format!("members[{i}]"))?;
    }
    Ok(builder.finish())
}

fn add_member(
    b: &mut UnitBuilder,
    parent: NodeId,
    member: &MemberDto,
    ctx: &str,
) -> Result<(), SnapshotError> {
    match member {
        MemberDto::Namespace(ns) => add_namespace(b, parent, ns, ctx),
        MemberDto::Class(t) => add_type(b, parent, SyntaxKind::Class, t, ctx),
        MemberDto::Struct(t) => add_type(b, parent, SyntaxKind::Struct, t, ctx),
        MemberDto::Interface(t) => add_type(b, parent, SyntaxKind::Interface, t, ctx),
        MemberDto::Enum(t) => add_type(b, parent, SyntaxKind::Enum, t, ctx),
        MemberDto::Method(c) => {
            add_callable(b, parent, SyntaxKind::Method, c);
            Ok(())
        }
        MemberDto::Constructor(c) => {
            add_callable(b, parent, SyntaxKind::Constructor, c);
            Ok(())
        }
        MemberDto::Property(p) => add_property(b, parent, SyntaxKind::Property, p, ctx),
        MemberDto::Indexer(p) => add_property(b, parent, SyntaxKind::Indexer, p, ctx),
        MemberDto::Field(f) => add_field(b, parent, f, ctx),
        MemberDto::Event(e) => {
            add_event(b, parent, e);
            Ok(())
        }
    }
}

fn add_namespace(
    b: &mut UnitBuilder,
    parent: NodeId,
    ns: &NamespaceDto,
    ctx: &str,
) -> Result<(), SnapshotError> {
    let id = b.node(parent, SyntaxKind::Namespace, Some(&ns.name), ns.span);
    for (i, member) in ns.members.iter().enumerate() {
        add_member(b, id, member, &format!("{ctx}.members[{i}]"))?;
    }
    Ok(())
}

fn add_annotations(b: &mut UnitBuilder, target: NodeId, annotations: &[AnnotationDto]) {
    for a in annotations {
        b.annotation(target, a.ty.clone(), a.span);
    }
}

fn add_type(
    b: &mut UnitBuilder,
    parent: NodeId,
    kind: SyntaxKind,
    t: &TypeDto,
    ctx: &str,
) -> Result<(), SnapshotError> {
    let id = b.node(parent, kind, Some(&t.name), t.span);
    b.declare(
        id,
        Symbol::new(&t.name, t.accessibility, SymbolKind::Type)
            .with_modifiers(t.modifiers.iter().copied().collect()),
    );
    add_annotations(b, id, &t.annotations);
    for (i, member) in t.members.iter().enumerate() {
        add_member(b, id, member, &format!("{ctx}.members[{i}]"))?;
    }
    Ok(())
}

fn add_callable(b: &mut UnitBuilder, parent: NodeId, kind: SyntaxKind, c: &CallableDto) {
    let id = b.node(parent, kind, Some(&c.name), c.span);
    b.declare(
        id,
        Symbol::new(&c.name, c.accessibility, SymbolKind::Method)
            .with_modifiers(c.modifiers.iter().copied().collect()),
    );
    add_annotations(b, id, &c.annotations);
    for p in &c.parameters {
        let param = b.node(id, SyntaxKind::Parameter, Some(&p.name), p.span);
        b.declare(
            param,
            Symbol::new(&p.name, Accessibility::NotApplicable, SymbolKind::Parameter),
        );
        if let Some(ty) = &p.ty {
            b.resolve_type(param, ty.clone());
        }
    }
}

fn add_property(
    b: &mut UnitBuilder,
    parent: NodeId,
    kind: SyntaxKind,
    p: &PropertyDto,
    ctx: &str,
) -> Result<(), SnapshotError> {
    let mut getter = None;
    let mut setter = None;
    for (i, accessor) in p.accessors.iter().enumerate() {
        let accessibility = accessor.accessibility.unwrap_or(p.accessibility);
        match accessor.kind {
            AccessorKind::Get => getter = Some(accessibility),
            AccessorKind::Set | AccessorKind::Init => setter = Some(accessibility),
            AccessorKind::Add | AccessorKind::Remove => {
                return Err(SnapshotError::Invalid {
                    context: format!("{ctx}.accessors[{i}]"),
                    message: format!("`{}` accessor is only valid on events", p.name),
                });
            }
        }
    }

    // Read-only means "no writing accessor", whatever modifiers say.
    let mut modifiers: Modifiers = p
        .modifiers
        .iter()
        .copied()
        .filter(|&m| m != Modifier::ReadOnly)
        .collect();
    if getter.is_some() && setter.is_none() {
        modifiers = modifiers.with(Modifier::ReadOnly);
    }

    let facts = PropertyFacts {
        is_definition: !p.partial,
        is_write_only: setter.is_some() && getter.is_none(),
        is_indexer: kind == SyntaxKind::Indexer,
        is_with_events: p.with_events,
        returns_by_ref: p.returns_by_ref,
        getter,
        setter,
    };

    let id = b.node(parent, kind, Some(&p.name), p.span);
    b.declare(
        id,
        Symbol::new(&p.name, p.accessibility, SymbolKind::Property(facts)).with_modifiers(modifiers),
    );
    if let Some(ty) = &p.ty {
        b.resolve_type(id, ty.clone());
    }
    add_annotations(b, id, &p.annotations);
    for accessor in &p.accessors {
        b.node(
            id,
            SyntaxKind::Accessor {
                kind: accessor.kind,
                body: accessor.body,
            },
            None,
            accessor.span,
        );
    }
    Ok(())
}

fn add_field(
    b: &mut UnitBuilder,
    parent: NodeId,
    f: &FieldDto,
    ctx: &str,
) -> Result<(), SnapshotError> {
    if f.variables.is_empty() {
        return Err(SnapshotError::Invalid {
            context: format!("{ctx}.variables"),
            message: "a field declares at least one variable".to_string(),
        });
    }

    let modifiers: Modifiers = f.modifiers.iter().copied().collect();
    let id = b.node(parent, SyntaxKind::Field, None, f.span);
    add_annotations(b, id, &f.annotations);
    for name in &f.variables {
        let var = b.node(id, SyntaxKind::Variable, Some(name), f.span);
        b.declare(
            var,
            Symbol::new(name, f.accessibility, SymbolKind::Field).with_modifiers(modifiers),
        );
        if let Some(ty) = &f.ty {
            b.resolve_type(var, ty.clone());
        }
    }
    Ok(())
}

fn add_event(b: &mut UnitBuilder, parent: NodeId, e: &EventDto) {
    let id = b.node(parent, SyntaxKind::Event, Some(&e.name), e.span);
    b.declare(
        id,
        Symbol::new(&e.name, e.accessibility, SymbolKind::Event)
            .with_modifiers(e.modifiers.iter().copied().collect()),
    );
    add_annotations(b, id, &e.annotations);
}
