//! Binding and produced-instance records.

use std::any::Any;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::{key_of, BindKey, RESERVED_ID};
use crate::traits::{views_of, Injectable};

/// Type-erased binding storage. A binding under the bind type `T` holds an
/// `Arc<T>` inside, so trait objects survive the erasure.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// One declared binding: bind type, discriminator, and the shared instance
/// once it was supplied.
pub(crate) struct BindRecord {
    pub(crate) key: BindKey,
    pub(crate) id: u16,
    pub(crate) instance: Option<AnyArc>,
    /// Concrete type behind the binding, for diagnostics
    pub(crate) impl_name: Option<&'static str>,
}

/// One concrete instance produced during setup.
pub(crate) struct ProducedRecord {
    pub(crate) produced_key: BindKey,
    pub(crate) instance: Option<Arc<dyn Injectable>>,
}

/// Registry holding every binding and produced record, in declaration order.
#[derive(Default)]
pub(crate) struct Registry {
    pub(crate) binds: Vec<BindRecord>,
    pub(crate) produced: Vec<ProducedRecord>,
    /// Size of the most recent pending group (tail of `binds`)
    pending: usize,
    /// Index into `produced` of the record awaiting its instance
    current: Option<usize>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn declare(&mut self, keys: &[BindKey]) {
        self.binds.extend(keys.iter().map(|&key| BindRecord {
            key,
            id: RESERVED_ID,
            instance: None,
            impl_name: None,
        }));
        self.pending = keys.len();
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending
    }

    fn pending_group(&mut self) -> &mut [BindRecord] {
        let start = self.binds.len() - self.pending;
        &mut self.binds[start..]
    }

    pub(crate) fn with_id(&mut self, id: u16) -> DiResult<()> {
        if id == RESERVED_ID {
            return Err(DiError::InvalidArgument(format!(
                "id {} is reserved by the injection container, please specify a number greater than {}",
                id, RESERVED_ID
            )));
        }
        for record in self.pending_group() {
            record.id = id;
        }
        Ok(())
    }

    pub(crate) fn declare_produced(&mut self, key: BindKey) {
        self.produced.push(ProducedRecord {
            produced_key: key,
            instance: None,
        });
        self.current = Some(self.produced.len() - 1);
    }

    /// Writes `instance` into the pending group and the current produced
    /// record. Nothing is written when any pending bind type is not exposed
    /// by `C`.
    pub(crate) fn supply<C: Injectable>(&mut self, instance: Arc<C>) -> DiResult<()> {
        let index = self
            .current
            .filter(|&i| self.produced[i].produced_key == key_of::<C>())
            .ok_or(DiError::InternalInvariantViolation(
                "no produced record matches the supplied instance",
            ))?;
        if self.produced[index].instance.is_some() {
            return Err(DiError::InternalInvariantViolation(
                "produced record already holds an instance",
            ));
        }

        let views = views_of(&instance);
        let mut resolved = Vec::with_capacity(self.pending);
        for record in self.pending_group().iter() {
            let view = views.get(&record.key).ok_or(DiError::TypeMismatch {
                expected: record.key.display_name(),
                found: std::any::type_name::<C>(),
            })?;
            resolved.push(view.clone());
        }

        let impl_name = std::any::type_name::<C>();
        for (record, view) in self.pending_group().iter_mut().zip(resolved) {
            record.instance = Some(view);
            record.impl_name = Some(impl_name);
        }
        self.produced[index].instance = Some(instance);

        // A later `to` without `bind` must not rewrite this group
        self.pending = 0;
        self.current = None;
        Ok(())
    }

    /// Finds the single record for `key`. `RESERVED_ID` matches any id.
    pub(crate) fn lookup(&self, key: &BindKey, id: u16) -> DiResult<&BindRecord> {
        let mut matches = self
            .binds
            .iter()
            .filter(|r| r.key == *key && (id == RESERVED_ID || r.id == id));
        let wanted = (id != RESERVED_ID).then_some(id);

        let first = matches.next().ok_or(DiError::NotFound {
            type_name: key.display_name(),
            id: wanted,
        })?;
        if matches.next().is_some() {
            return Err(DiError::AmbiguousBinding {
                type_name: key.display_name(),
                id: wanted,
            });
        }
        Ok(first)
    }

    pub(crate) fn lookup_instance(&self, key: &BindKey, id: u16) -> DiResult<AnyArc> {
        let record = self.lookup(key, id)?;
        // Declared but never given an instance
        record.instance.clone().ok_or(DiError::NotFound {
            type_name: key.display_name(),
            id: (id != RESERVED_ID).then_some(id),
        })
    }
}
