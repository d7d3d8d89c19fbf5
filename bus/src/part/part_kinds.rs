use std::collections::HashMap;

use crate::part::error::PartError;
use crate::part::part::{ItemId, Part};

/// Builds fresh instances of one registered part type.
pub trait PartBuilder: Send + Sync {
    /// The item identity instances of this type carry on the wire.
    fn item(&self) -> ItemId;

    /// Stable name used by the durable channel.
    fn name(&self) -> &'static str;

    fn build(&self) -> Box<dyn Part>;
}

/// Registry of every part type a container may hold.
///
/// Registration happens once during startup, after which the registry is
/// locked; both serialization channels resolve identities through it (the
/// stream channel by [`ItemId`], the durable channel by name).
pub struct PartKinds {
    builders: HashMap<ItemId, Box<dyn PartBuilder>>,
    names: HashMap<&'static str, ItemId>,
    locked: bool,
}

impl Default for PartKinds {
    fn default() -> Self {
        Self {
            builders: HashMap::new(),
            names: HashMap::new(),
            locked: false,
        }
    }
}

impl PartKinds {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn add_part(&mut self, builder: Box<dyn PartBuilder>) -> &mut Self {
        self.check_lock();
        if let Err(err) = self.register(builder) {
            panic!("{err}");
        }
        self
    }

    pub fn try_add_part(&mut self, builder: Box<dyn PartBuilder>) -> Result<&mut Self, PartError> {
        self.try_check_lock()?;
        self.register(builder)?;
        Ok(self)
    }

    fn register(&mut self, builder: Box<dyn PartBuilder>) -> Result<(), PartError> {
        let item = builder.item();
        let name = builder.name();
        if self.builders.contains_key(&item) {
            return Err(PartError::DuplicateItem { item });
        }
        if self.names.contains_key(name) {
            return Err(PartError::DuplicateName { name });
        }
        self.names.insert(name, item);
        self.builders.insert(item, builder);
        Ok(())
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    pub fn try_lock(&mut self) -> Result<(), PartError> {
        self.try_check_lock()?;
        self.locked = true;
        Ok(())
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Panics when the registry is locked; for setup-time code paths.
    fn check_lock(&self) {
        if self.locked {
            panic!("PartKinds registry already locked!");
        }
    }

    fn try_check_lock(&self) -> Result<(), PartError> {
        if self.locked {
            Err(PartError::RegistryLocked)
        } else {
            Ok(())
        }
    }

    /// Build a fresh part from a wire identity.
    pub fn create(&self, item: ItemId) -> Result<Box<dyn Part>, PartError> {
        match self.builders.get(&item) {
            Some(builder) => Ok(builder.build()),
            None => Err(PartError::UnknownItem { item }),
        }
    }

    /// Build a fresh part from a durable identity.
    pub fn create_by_name(&self, name: &str) -> Result<Box<dyn Part>, PartError> {
        match self.names.get(name) {
            Some(item) => self.create(*item),
            None => Err(PartError::UnknownName {
                name: name.to_owned(),
            }),
        }
    }

    /// The durable name registered for a wire identity.
    pub fn name_of(&self, item: ItemId) -> Option<&'static str> {
        self.builders.get(&item).map(|builder| builder.name())
    }
}
