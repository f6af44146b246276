//! Binds instances to insert and update plans, producing the statements to
//! execute.

use super::{BindingSource, PartKind, Planner, UpdatePart};

use tabula_core::{
    driver::Sql,
    err,
    schema::{db::TableKind, Host, NavigationTarget},
    stmt::{Instance, Value},
    Error, Result, Schema,
};

/// The object whose child-hosted collection holds the object being
/// inserted.
#[derive(Debug, Clone, Copy)]
struct HostRef<'a> {
    owner: &'a str,
    property: &'a str,
    id: &'a Value,
}

/// Statements inserting `instance` and everything it holds.
///
/// Order: referenced instances that are fully present, then the object's
/// entity tables root first, then its primitive list elements, then the
/// items of its child-hosted collections.
pub(crate) fn insert(schema: &Schema, instance: &Instance) -> Result<Vec<Sql>> {
    let planner = Planner::new(schema);
    let mut out = vec![];

    insert_into(&planner, instance, None, &mut out)?;

    Ok(out)
}

/// Statements writing `properties` of an existing object.
pub(crate) fn update(
    schema: &Schema,
    instance: &Instance,
    properties: &[&str],
) -> Result<Vec<Sql>> {
    for property in properties {
        instance.expect_field(property)?;
    }

    let planner = Planner::new(schema);
    let plan = planner.update(&instance.ty, properties)?;
    let identity = identity_of(schema, instance)?;

    let mut out = vec![];
    for part in &plan.parts {
        bind_part(schema, part, instance, identity, None, &mut out)?;
    }

    Ok(out)
}

fn insert_into(
    planner: &Planner<'_>,
    instance: &Instance,
    host: Option<HostRef<'_>>,
    out: &mut Vec<Sql>,
) -> Result<()> {
    let schema = planner.schema();
    let mapping = schema.ty(&instance.ty)?;
    let identity = identity_of(schema, instance)?;

    for property in mapping.properties.values() {
        let Some(navigation) = property.navigation() else {
            continue;
        };

        if navigation.host == Host::Parent {
            if let Some(Value::Instance(target)) = instance.get(&property.name) {
                insert_into(planner, target, None, out)?;
            }
        }
    }

    let plan = planner.insert(&instance.ty)?;
    for part in &plan.parts {
        bind_part(schema, part, instance, identity, host, out)?;
    }

    for property in mapping.properties.values() {
        let Some(navigation) = property.navigation() else {
            continue;
        };

        if !navigation.many || !matches!(navigation.target, NavigationTarget::Type(_)) {
            continue;
        }

        let items = match instance.get(&property.name) {
            None | Some(Value::Null) => continue,
            Some(Value::List(items)) => items,
            Some(other) => return Err(Error::type_conversion(other.clone(), "List")),
        };

        let host = HostRef {
            owner: &schema.ty_by_id(property.declared_by).name,
            property: &property.name,
            id: identity,
        };

        for item in items {
            match item {
                Value::Instance(item) => insert_into(planner, item, Some(host), out)?,
                other => return Err(Error::type_conversion(other.clone(), "Instance")),
            }
        }
    }

    Ok(())
}

fn bind_part(
    schema: &Schema,
    part: &UpdatePart,
    instance: &Instance,
    identity: &Value,
    host: Option<HostRef<'_>>,
    out: &mut Vec<Sql>,
) -> Result<()> {
    if part.kind != PartKind::ListInsert {
        let mut sql = Sql::new(&part.sql);

        for binding in &part.bindings {
            let value = bind_value(schema, &binding.source, instance, identity, host)?;
            sql.params.push((binding.param.clone(), value));
        }

        out.push(sql);
        return Ok(());
    }

    let TableKind::PrimitiveList { property, .. } = &schema.table(part.table).kind else {
        return Err(err!("list insert into entity table {:?}", part.table));
    };

    let items = match instance.get(property) {
        None | Some(Value::Null) => &[][..],
        Some(Value::List(items)) => &items[..],
        Some(other) => return Err(Error::type_conversion(other.clone(), "List")),
    };

    for (index, item) in items.iter().enumerate() {
        let mut sql = Sql::new(&part.sql);

        for binding in &part.bindings {
            let value = match binding.source {
                BindingSource::ListParent => identity.clone(),
                BindingSource::ListValue => item.clone(),
                BindingSource::ListIndex => Value::I64(index as i64),
                ref source => return Err(err!("{source:?} bound in a list insert")),
            };
            sql.params.push((binding.param.clone(), value));
        }

        out.push(sql);
    }

    Ok(())
}

fn bind_value(
    schema: &Schema,
    source: &BindingSource,
    instance: &Instance,
    identity: &Value,
    host: Option<HostRef<'_>>,
) -> Result<Value> {
    Ok(match source {
        BindingSource::Identity | BindingSource::ListParent => identity.clone(),
        BindingSource::Discriminator(discriminator) => Value::I32(*discriminator),
        BindingSource::Property(name) => instance.get(name).cloned().unwrap_or(Value::Null),
        BindingSource::Reference(name) => match instance.get(name) {
            None | Some(Value::Null) => Value::Null,
            Some(Value::Instance(target)) => identity_of(schema, target)?.clone(),
            Some(Value::Reference(reference)) => (*reference.id).clone(),
            Some(other) => return Err(Error::type_conversion(other.clone(), "Reference")),
        },
        BindingSource::HostIdentity { owner, property } => match host {
            Some(host) if host.owner == owner && host.property == property => host.id.clone(),
            _ => Value::Null,
        },
        BindingSource::ListValue | BindingSource::ListIndex => {
            return Err(err!("{source:?} bound outside a list insert"));
        }
    })
}

fn identity_of<'a>(schema: &Schema, instance: &'a Instance) -> Result<&'a Value> {
    let mapping = schema.ty(&instance.ty)?;

    match instance.get(&mapping.identity) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(Error::configuration(format!(
            "instance of `{}` has no identity `{}`",
            instance.ty, mapping.identity
        ))),
    }
}
