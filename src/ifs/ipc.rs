//! The selection state machine.
//!
//! At most one source is the primary selection at any time. When a source
//! becomes the selection, every registered device receives a fresh offer
//! referencing it. When the source is replaced or destroyed, the outstanding
//! offers have their source reference severed but stay alive until their
//! clients release them.

use {
    crate::{
        client::{Client, ClientId},
        ifs::ipc::{
            zwp_primary_selection_device_v1::ZwpPrimarySelectionDeviceV1,
            zwp_primary_selection_offer_v1::ZwpPrimarySelectionOfferV1,
            zwp_primary_selection_source_v1::ZwpPrimarySelectionSourceV1,
        },
        utils::{
            clonecell::CloneCell, copyhashmap::CopyHashMap, numcell::NumCell, smallmap::SmallMap,
        },
        wire::ZwpPrimarySelectionDeviceV1Id,
    },
    std::{cell::RefCell, rc::Rc},
    uapi::OwnedFd,
};

pub mod zwp_primary_selection_device_manager_v1;
pub mod zwp_primary_selection_device_v1;
pub mod zwp_primary_selection_offer_v1;
pub mod zwp_primary_selection_source_v1;

#[cfg(test)]
mod tests;

linear_ids!(DataSourceIds, DataSourceId);
linear_ids!(DataOfferIds, DataOfferId);

const SOURCE_STATE_CANCELLED: u32 = 1 << 0;

pub struct DeviceData {
    pub(crate) selection: CloneCell<Option<Rc<ZwpPrimarySelectionOfferV1>>>,
}

pub struct OfferData {
    pub(crate) device: CloneCell<Option<Rc<ZwpPrimarySelectionDeviceV1>>>,
    pub(crate) source: CloneCell<Option<Rc<ZwpPrimarySelectionSourceV1>>>,
}

pub struct SourceData {
    pub id: DataSourceId,
    pub client: Rc<Client>,
    pub(crate) mime_types: RefCell<Vec<String>>,
    pub(crate) offers: SmallMap<DataOfferId, Rc<ZwpPrimarySelectionOfferV1>, 1>,
    state: NumCell<u32>,
}

impl SourceData {
    pub(crate) fn new(client: &Rc<Client>) -> Self {
        Self {
            id: client.state.data_source_ids.next(),
            client: client.clone(),
            mime_types: Default::default(),
            offers: Default::default(),
            state: NumCell::new(0),
        }
    }
}

/// The controller holding the single current selection and the registered
/// devices. One instance per [`State`](crate::state::State).
pub struct SelectionBroker {
    current: CloneCell<Option<Rc<ZwpPrimarySelectionSourceV1>>>,
    devices:
        CopyHashMap<(ClientId, ZwpPrimarySelectionDeviceV1Id), Rc<ZwpPrimarySelectionDeviceV1>>,
}

impl Default for SelectionBroker {
    fn default() -> Self {
        Self {
            current: Default::default(),
            devices: Default::default(),
        }
    }
}

impl SelectionBroker {
    pub fn add_device(&self, dd: &Rc<ZwpPrimarySelectionDeviceV1>) {
        self.devices.set((dd.client.id, dd.id), dd.clone());
    }

    pub fn remove_device(&self, dd: &ZwpPrimarySelectionDeviceV1) {
        self.devices.remove(&(dd.client.id, dd.id));
    }

    pub fn current(&self) -> Option<Rc<ZwpPrimarySelectionSourceV1>> {
        self.current.get()
    }

    pub fn is_current(&self, src: &ZwpPrimarySelectionSourceV1) -> bool {
        match self.current.get() {
            Some(cur) => cur.data.id == src.data.id,
            _ => false,
        }
    }

    /// Installs `src` as the selection, or clears it. The previous source, if
    /// any and different, is cancelled before the new offers fan out.
    pub fn set_selection(&self, src: Option<Rc<ZwpPrimarySelectionSourceV1>>) {
        if let Some(new) = &src {
            if self.is_current(new) {
                return;
            }
        }
        let prev = self.current.set(src.clone());
        if let Some(prev) = &prev {
            detach_source(prev);
        }
        if let Some(src) = &src {
            offer_source_to_devices(src, self);
        }
    }

    pub fn num_devices(&self) -> usize {
        self.devices.len()
    }

    pub fn clear(&self) {
        self.current.take();
        self.devices.clear();
    }

    fn device_snapshot(&self) -> Vec<Rc<ZwpPrimarySelectionDeviceV1>> {
        self.devices.lock().values().cloned().collect()
    }
}

pub fn add_source_mime_type(src: &ZwpPrimarySelectionSourceV1, mime_type: &str) {
    // Formats declared after the source became the selection are not
    // forwarded to offers that already exist.
    src.data.mime_types.borrow_mut().push(mime_type.to_string());
}

/// Severs the source reference of every outstanding offer. The offers stay
/// alive until their clients release them.
pub fn cancel_offers(src: &ZwpPrimarySelectionSourceV1) {
    while let Some((_, offer)) = src.data.offers.pop() {
        offer.data.source.take();
    }
}

fn detach_source(src: &Rc<ZwpPrimarySelectionSourceV1>) {
    cancel_offers(src);
    let state = src.data.state.get();
    if state & SOURCE_STATE_CANCELLED == 0 {
        src.data.state.set(state | SOURCE_STATE_CANCELLED);
        src.send_cancelled();
    }
}

fn offer_source_to_devices(src: &Rc<ZwpPrimarySelectionSourceV1>, broker: &SelectionBroker) {
    let data = &src.data;
    data.state.set(data.state.get() & !SOURCE_STATE_CANCELLED);
    for dd in broker.device_snapshot() {
        let client = &dd.client;
        // Best effort per device. A client that cannot allocate the offer
        // does not block delivery to the others.
        let id = match client.new_id() {
            Ok(id) => id,
            Err(e) => {
                client.error(e);
                continue;
            }
        };
        let offer = Rc::new(ZwpPrimarySelectionOfferV1 {
            id,
            offer_id: client.state.data_offer_ids.next(),
            client: client.clone(),
            data: OfferData {
                device: CloneCell::new(Some(dd.clone())),
                source: CloneCell::new(Some(src.clone())),
            },
        });
        data.offers.insert(offer.offer_id, offer.clone());
        client.add_server_obj(&offer);
        dd.send_data_offer(&offer);
        for mt in &*data.mime_types.borrow() {
            offer.send_offer(mt);
        }
        dd.send_selection(Some(&offer));
        dd.data.selection.set(Some(offer));
    }
}

pub fn receive_offer(offer: &ZwpPrimarySelectionOfferV1, mime_type: &str, fd: Rc<OwnedFd>) {
    match offer.data.source.get() {
        Some(src) => src.send_send(mime_type, fd),
        _ => log::debug!(
            "Client {} tried to receive from a cancelled offer",
            offer.client.id
        ),
    }
}

pub fn destroy_offer(offer: &ZwpPrimarySelectionOfferV1) {
    if let Some(src) = offer.data.source.take() {
        src.data.offers.remove(&offer.offer_id);
    }
    if let Some(dd) = offer.data.device.take() {
        if let Some(cur) = dd.data.selection.get() {
            if cur.offer_id == offer.offer_id {
                dd.data.selection.take();
            }
        }
    }
}

pub fn destroy_device(dd: &ZwpPrimarySelectionDeviceV1) {
    dd.client.state.selection.remove_device(dd);
    if let Some(offer) = dd.data.selection.take() {
        destroy_offer(&offer);
    }
}

pub(crate) fn break_source_loops(src: &ZwpPrimarySelectionSourceV1) {
    cancel_offers(src);
    let broker = &src.data.client.state.selection;
    if broker.is_current(src) {
        broker.current.take();
    }
}

pub(crate) fn break_offer_loops(offer: &ZwpPrimarySelectionOfferV1) {
    offer.data.device.take();
    destroy_offer(offer);
}

pub(crate) fn break_device_loops(dd: &ZwpPrimarySelectionDeviceV1) {
    dd.data.selection.take();
    dd.client.state.selection.remove_device(dd);
}
