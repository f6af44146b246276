mod layer;
use layer::{Expansion, Layer};

use super::{SelectShape, Segment};

use std::collections::BTreeMap;
use tabula_core::{
    driver::Cursor,
    err,
    schema::TypeId,
    stmt::{Instance, Value},
    Error, Result, Schema,
};

/// Turns the rows of a planned SELECT back into objects.
///
/// Rows of one root object are contiguous and share the root identity. The
/// materializer folds each run of rows into one [`Instance`], recursing into
/// included navigations and primitive lists as the shape describes. Repeated
/// rows of one object, as produced by filter joins through collections, fold
/// into that object rather than decoding it again. Objects
/// are produced lazily, one group at a time; the cursor is consumed exactly
/// once.
///
/// A decode error ends the sequence: the failing item is returned as `Err`
/// and every later call to `next` returns `None`.
#[derive(Debug)]
pub struct Materializer {
    cursor: Box<dyn Cursor>,

    /// One layer per type and sub-type segment, outermost first
    layers: Vec<Layer>,

    /// Primitive list folded into objects of the last layer
    expansion: Option<Expansion>,

    started: bool,

    /// Whether the cursor is positioned on an unconsumed row
    has_row: bool,
}

impl Materializer {
    /// Compiles the shape's layers against `schema`. Column ordinals are
    /// resolved here, once, so decoding only reads the cursor.
    pub fn new(schema: &Schema, shape: &SelectShape, cursor: Box<dyn Cursor>) -> Result<Self> {
        let mut layers: Vec<Layer> = vec![];
        let mut expansion = None;
        let mut offset = 0;

        for (index, segment) in shape.segments.iter().enumerate() {
            if expansion.is_some() {
                return Err(err!("shape segment {index} follows a primitive list"));
            }

            match segment {
                Segment::Type { ty, tables } => {
                    if index != 0 {
                        return Err(err!("shape segment {index} is a second root"));
                    }

                    layers.push(Layer::compile(schema, *ty, tables, &mut offset, None)?);
                }
                Segment::SubType {
                    ty,
                    tables,
                    collecting_ty,
                    property,
                    many,
                } => {
                    check_collecting(&layers, *collecting_ty, index)?;

                    let collect = layer::Collect {
                        property: property.clone(),
                        many: *many,
                    };
                    layers.push(Layer::compile(
                        schema,
                        *ty,
                        tables,
                        &mut offset,
                        Some(collect),
                    )?);
                }
                Segment::Expansion {
                    table,
                    collecting_ty,
                    property,
                    maintain_order,
                } => {
                    check_collecting(&layers, *collecting_ty, index)?;

                    expansion = Some(Expansion::compile(
                        schema,
                        *table,
                        property,
                        *maintain_order,
                        &mut offset,
                    )?);
                }
            }
        }

        if layers.is_empty() {
            return Err(err!("shape has no root segment"));
        }

        Ok(Materializer {
            cursor,
            layers,
            expansion,
            started: false,
            has_row: false,
        })
    }

    fn advance(&mut self) -> Result<()> {
        self.has_row = self.cursor.advance()?;
        Ok(())
    }

    /// Whether the current row still belongs to every group on `keys`.
    fn same_group(&self, keys: &[Value]) -> Result<bool> {
        for (layer, key) in self.layers.iter().zip(keys) {
            if self.cursor.get(layer.key, layer.key_ty)? != *key {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Decodes the object of layer `depth` the current row starts, consuming
    /// every row of its group.
    fn read_object(&mut self, depth: usize, keys: &mut Vec<Value>) -> Result<Instance> {
        let layer = &self.layers[depth];
        let key = self.cursor.get(layer.key, layer.key_ty)?;
        let mut instance = layer.construct(&*self.cursor)?;
        layer.fill(&*self.cursor, &mut instance)?;

        keys.push(key);

        if depth + 1 < self.layers.len() {
            self.read_nested(depth + 1, keys, &mut instance)?;
        } else if self.expansion.is_some() {
            self.read_expansion(keys, &mut instance)?;
        } else {
            // Filter joins through collections repeat the row once per match
            loop {
                self.advance()?;

                if !self.has_row || !self.same_group(keys)? {
                    break;
                }
            }
        }

        keys.pop();
        Ok(instance)
    }

    fn read_nested(
        &mut self,
        depth: usize,
        keys: &mut Vec<Value>,
        instance: &mut Instance,
    ) -> Result<()> {
        let mut items = vec![];

        loop {
            if self.cursor.is_null(self.layers[depth].key)? {
                // LEFT OUTER miss
                self.advance()?;
            } else {
                items.push(Value::from(self.read_object(depth, keys)?));
            }

            if !self.has_row || !self.same_group(keys)? {
                break;
            }
        }

        let layer = &self.layers[depth];
        let Some(collect) = &layer.collect else {
            return Err(err!("nested layer {depth} has no collecting property"));
        };

        let value = if collect.many {
            Value::List(items)
        } else {
            match items.len() {
                0 => Value::Null,
                1 => items.remove(0),
                n => {
                    return Err(Error::decode(format!(
                        "`{}.{}` is singular but {n} objects matched",
                        instance.ty, collect.property
                    )));
                }
            }
        };

        instance.set(collect.property.clone(), value);
        Ok(())
    }

    fn read_expansion(&mut self, keys: &[Value], instance: &mut Instance) -> Result<()> {
        let Some(expansion) = &self.expansion else {
            return Err(err!("no primitive list to expand"));
        };
        let expansion = expansion.clone();

        let mut ordered = BTreeMap::new();
        let mut values = vec![];

        loop {
            if !self.cursor.is_null(expansion.parent)? {
                let value = self.cursor.get(expansion.value, expansion.value_ty)?;

                match expansion.index {
                    Some(index) => {
                        ordered.insert(self.cursor.get_i64(index)?, value);
                    }
                    None => values.push(value),
                }
            }

            self.advance()?;

            if !self.has_row || !self.same_group(keys)? {
                break;
            }
        }

        if expansion.index.is_some() {
            values = ordered.into_values().collect();
        }

        instance.set(expansion.property, Value::List(values));
        Ok(())
    }
}

impl Iterator for Materializer {
    type Item = Result<Instance>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;

            if let Err(err) = self.advance() {
                self.has_row = false;
                return Some(Err(err));
            }
        }

        if !self.has_row {
            return None;
        }

        let mut keys = vec![];
        match self.read_object(0, &mut keys) {
            Ok(instance) => {
                log::trace!(
                    "materialized `{}` {:?}",
                    instance.ty,
                    instance.get(&self.layers[0].identity)
                );
                Some(Ok(instance))
            }
            Err(err) => {
                self.has_row = false;
                Some(Err(err))
            }
        }
    }
}

fn check_collecting(layers: &[Layer], collecting_ty: TypeId, index: usize) -> Result<()> {
    match layers.last() {
        Some(layer) if layer.ty == collecting_ty => Ok(()),
        _ => Err(err!(
            "shape segment {index} is not collected by the segment before it"
        )),
    }
}
