use {
    crate::{
        client::{Client, ClientError},
        object::{Interface, ObjectId},
        utils::{copyhashmap::CopyHashMap, numcell::NumCell},
    },
    std::{
        fmt::{Display, Formatter},
        rc::Rc,
    },
    thiserror::Error,
};

#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct GlobalName(u32);

impl GlobalName {
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl Display for GlobalName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Error)]
pub enum GlobalsError {
    #[error("The global {0} does not exist")]
    GlobalDoesNotExist(GlobalName),
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(GlobalsError, ClientError);

/// An extension advertised to every client. `bind` creates the
/// connection-facing factory object.
pub trait Global {
    fn name(&self) -> GlobalName;
    fn interface(&self) -> Interface;
    fn version(&self) -> u32;

    fn singleton(&self) -> bool {
        true
    }

    fn bind(
        self: Rc<Self>,
        client: &Rc<Client>,
        id: ObjectId,
        version: u32,
    ) -> Result<(), GlobalsError>;
}

pub struct Globals {
    next_name: NumCell<u32>,
    registry: CopyHashMap<GlobalName, Rc<dyn Global>>,
}

impl Globals {
    pub fn new() -> Self {
        Self {
            next_name: NumCell::new(1),
            registry: Default::default(),
        }
    }

    pub fn name(&self) -> GlobalName {
        GlobalName(self.next_name.fetch_add(1))
    }

    pub fn add_global(&self, global: &Rc<dyn Global>) {
        self.registry.set(global.name(), global.clone());
    }

    pub fn get(&self, name: GlobalName) -> Result<Rc<dyn Global>, GlobalsError> {
        match self.registry.get(&name) {
            Some(g) => Ok(g),
            _ => Err(GlobalsError::GlobalDoesNotExist(name)),
        }
    }

    pub fn clear(&self) {
        self.registry.clear();
    }
}
