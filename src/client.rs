use {
    crate::{
        ifs::ipc::zwp_primary_selection_source_v1::ZwpPrimarySelectionSourceV1,
        object::{Interface, MIN_SERVER_ID, Object, ObjectId},
        state::State,
        utils::{copyhashmap::CopyHashMap, numcell::NumCell},
        wire::{Event, ZwpPrimarySelectionSourceV1Id},
    },
    std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
        fmt::{Debug, Display, Formatter},
        rc::Rc,
    },
    thiserror::Error,
};

#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct ClientId(u64);

impl ClientId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Client {0} does not exist")]
    ClientDoesNotExist(ClientId),
    #[error("The id {0} is not a valid object id")]
    InvalidId(ObjectId),
    #[error("The id {0} is already in use")]
    IdAlreadyInUse(ObjectId),
    #[error("The object {0} does not exist")]
    ObjectDoesNotExist(ObjectId),
    #[error("The server-allocated id range is exhausted")]
    ServerIdsExhausted,
    #[error("There is no {} with id {id}", .interface.name())]
    LookupError { interface: Interface, id: ObjectId },
}

/// The set of connected clients. Removing a client synchronously severs all
/// references between its objects and the rest of the object graph.
pub struct Clients {
    next_client_id: NumCell<u64>,
    clients: CopyHashMap<ClientId, Rc<Client>>,
}

impl Clients {
    pub fn new() -> Self {
        Self {
            next_client_id: NumCell::new(1),
            clients: Default::default(),
        }
    }

    pub fn connect(&self, state: &Rc<State>) -> Rc<Client> {
        let id = ClientId(self.next_client_id.fetch_add(1));
        let client = Rc::new(Client {
            id,
            state: state.clone(),
            objects: Objects::new(),
            events: Default::default(),
            last_serial: Cell::new(0),
        });
        self.clients.set(id, client.clone());
        log::info!("Client {} connected", id);
        client
    }

    pub fn get(&self, id: ClientId) -> Result<Rc<Client>, ClientError> {
        match self.clients.get(&id) {
            Some(c) => Ok(c),
            _ => Err(ClientError::ClientDoesNotExist(id)),
        }
    }

    pub fn kill(&self, id: ClientId) {
        if let Some(client) = self.clients.remove(&id) {
            log::info!("Removing client {}", id);
            client.objects.destroy();
            client.events.borrow_mut().clear();
        }
    }

    pub fn clear(&self) {
        let ids: Vec<_> = self.clients.lock().keys().copied().collect();
        for id in ids {
            self.kill(id);
        }
    }
}

pub struct Client {
    pub id: ClientId,
    pub state: Rc<State>,
    pub objects: Objects,
    events: RefCell<VecDeque<Event>>,
    pub last_serial: Cell<u32>,
}

impl Client {
    pub fn event<T: EventFormatter>(&self, event: T) {
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "Client {} <= {}@{}.{:?}",
                self.id,
                event.interface().name(),
                event.id(),
                event,
            );
        }
        self.events.borrow_mut().push_back(event.into());
    }

    /// Drains the outgoing event queue. The host runtime serializes and
    /// flushes the messages.
    pub fn take_events(&self) -> Vec<Event> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn new_id<T: From<ObjectId>>(&self) -> Result<T, ClientError> {
        self.objects.server_id()
    }

    pub fn error(&self, message: impl std::error::Error) {
        log::error!("Client {}: A fatal error occurred: {}", self.id, message);
        self.state.clients.kill(self.id);
    }

    pub fn add_client_obj<T: WaylandObject>(&self, obj: &Rc<T>) -> Result<(), ClientError> {
        self.objects.add_client_object(obj.clone())?;
        obj.clone().add(self);
        Ok(())
    }

    pub fn add_server_obj<T: WaylandObject>(&self, obj: &Rc<T>) {
        self.objects.add_server_object(obj.clone());
        obj.clone().add(self);
    }

    pub fn remove_obj<T: WaylandObject>(&self, obj: &T) -> Result<(), ClientError> {
        obj.remove(self);
        self.objects.remove(obj.id())
    }

    pub fn lookup<Id: WaylandObjectLookup>(&self, id: Id) -> Result<Rc<Id::Object>, ClientError> {
        match Id::lookup(self, id) {
            Some(t) => Ok(t),
            _ => Err(ClientError::LookupError {
                interface: Id::INTERFACE,
                id: id.into(),
            }),
        }
    }
}

pub trait EventFormatter: Debug + Into<Event> {
    fn id(&self) -> ObjectId;
    fn interface(&self) -> Interface;
}

/// A protocol object registered with a client. `add`/`remove` maintain the
/// dedicated per-type lookup tables.
pub trait WaylandObject: Object {
    fn add(self: Rc<Self>, client: &Client) {
        let _ = client;
    }

    fn remove(&self, client: &Client) {
        let _ = client;
    }
}

/// Resolves a client-supplied object reference to the typed implementation.
/// Ids of the wrong kind fail the lookup and are reported as protocol misuse.
pub trait WaylandObjectLookup: Copy + Into<ObjectId> {
    type Object;
    const INTERFACE: Interface;

    fn lookup(client: &Client, id: Self) -> Option<Rc<Self::Object>>;
}

/// The per-client object table.
pub struct Objects {
    registry: CopyHashMap<ObjectId, Rc<dyn Object>>,
    pub zwp_primary_selection_source:
        CopyHashMap<ZwpPrimarySelectionSourceV1Id, Rc<ZwpPrimarySelectionSourceV1>>,
    next_server_id: NumCell<u32>,
}

impl Objects {
    fn new() -> Self {
        Self {
            registry: Default::default(),
            zwp_primary_selection_source: Default::default(),
            next_server_id: NumCell::new(MIN_SERVER_ID),
        }
    }

    fn server_id<T: From<ObjectId>>(&self) -> Result<T, ClientError> {
        let raw = self.next_server_id.get();
        if raw == u32::MAX {
            return Err(ClientError::ServerIdsExhausted);
        }
        self.next_server_id.set(raw + 1);
        Ok(ObjectId::from_raw(raw).into())
    }

    fn add_client_object(&self, obj: Rc<dyn Object>) -> Result<(), ClientError> {
        let id = obj.id();
        if id == ObjectId::NONE {
            return Err(ClientError::InvalidId(id));
        }
        if self.registry.contains(&id) {
            return Err(ClientError::IdAlreadyInUse(id));
        }
        self.registry.set(id, obj);
        Ok(())
    }

    fn add_server_object(&self, obj: Rc<dyn Object>) {
        let id = obj.id();
        if self.registry.set(id, obj).is_some() {
            log::error!("Duplicate server object id {}", id);
        }
    }

    fn remove(&self, id: ObjectId) -> Result<(), ClientError> {
        match self.registry.remove(&id) {
            Some(_) => Ok(()),
            _ => Err(ClientError::ObjectDoesNotExist(id)),
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<Rc<dyn Object>> {
        self.registry.get(&id)
    }

    fn destroy(&self) {
        let objects: Vec<_> = self.registry.lock().drain().map(|(_, o)| o).collect();
        for obj in &objects {
            obj.break_loops();
        }
        self.zwp_primary_selection_source.clear();
    }
}
