use {
    crate::{
        client::Clients,
        globals::{Global, Globals},
        ifs::ipc::{
            DataOfferIds, DataSourceIds, SelectionBroker,
            zwp_primary_selection_device_manager_v1::ZwpPrimarySelectionDeviceManagerV1Global,
        },
    },
    std::rc::Rc,
};

/// Compositor-session-wide state. Created once when the extension is
/// registered with the host runtime and torn down with the session.
pub struct State {
    pub clients: Clients,
    pub globals: Globals,
    pub selection: SelectionBroker,
    pub data_source_ids: DataSourceIds,
    pub data_offer_ids: DataOfferIds,
    pub zwp_primary_selection_device_manager: Rc<ZwpPrimarySelectionDeviceManagerV1Global>,
}

impl State {
    pub fn new() -> Rc<Self> {
        let globals = Globals::new();
        let manager = Rc::new(ZwpPrimarySelectionDeviceManagerV1Global::new(
            globals.name(),
        ));
        globals.add_global(&(manager.clone() as Rc<dyn Global>));
        Rc::new(Self {
            clients: Clients::new(),
            globals,
            selection: Default::default(),
            data_source_ids: Default::default(),
            data_offer_ids: Default::default(),
            zwp_primary_selection_device_manager: manager,
        })
    }

    /// Tears down the session. Disconnects all clients and drops the current
    /// selection.
    pub fn clear(&self) {
        self.clients.clear();
        self.selection.clear();
        self.globals.clear();
    }
}
