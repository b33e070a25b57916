use {
    crate::{
        client::{Client, ClientError},
        ifs::ipc::{
            DeviceData, break_device_loops, destroy_device,
            zwp_primary_selection_offer_v1::ZwpPrimarySelectionOfferV1,
        },
        object::{Interface, Object, ObjectId},
        wire::{
            WlSeatId, ZWP_PRIMARY_SELECTION_DEVICE_V1, ZwpPrimarySelectionDeviceV1Id,
            ZwpPrimarySelectionOfferV1Id, ZwpPrimarySelectionSourceV1Id,
            zwp_primary_selection_device_v1::{DataOffer, Selection},
        },
    },
    std::rc::Rc,
    thiserror::Error,
};

pub struct ZwpPrimarySelectionDeviceV1 {
    pub id: ZwpPrimarySelectionDeviceV1Id,
    pub client: Rc<Client>,
    pub version: u32,
    pub seat: WlSeatId,
    pub(crate) data: DeviceData,
}

impl ZwpPrimarySelectionDeviceV1 {
    pub fn new(
        id: ZwpPrimarySelectionDeviceV1Id,
        client: &Rc<Client>,
        version: u32,
        seat: WlSeatId,
    ) -> Self {
        Self {
            id,
            client: client.clone(),
            version,
            seat,
            data: DeviceData {
                selection: Default::default(),
            },
        }
    }

    pub fn send_data_offer(&self, offer: &Rc<ZwpPrimarySelectionOfferV1>) {
        self.client.event(DataOffer {
            self_id: self.id,
            offer: offer.id,
        })
    }

    pub fn send_selection(&self, offer: Option<&Rc<ZwpPrimarySelectionOfferV1>>) {
        let id = offer
            .map(|o| o.id)
            .unwrap_or(ZwpPrimarySelectionOfferV1Id::NONE);
        self.client.event(Selection {
            self_id: self.id,
            id,
        })
    }

    /// Installs the referenced source as the selection, or clears it if
    /// `source` is null. `serial` orders the request against input events;
    /// focus gating is the host's concern and not applied here.
    pub fn set_selection(
        &self,
        source: ZwpPrimarySelectionSourceV1Id,
        serial: u32,
    ) -> Result<(), ZwpPrimarySelectionDeviceV1Error> {
        self.client.last_serial.set(serial);
        let src = if source.is_none() {
            None
        } else {
            Some(self.client.lookup(source)?)
        };
        self.client.state.selection.set_selection(src);
        Ok(())
    }

    pub fn destroy(&self) -> Result<(), ZwpPrimarySelectionDeviceV1Error> {
        destroy_device(self);
        self.client.remove_obj(self)?;
        Ok(())
    }
}

impl Object for ZwpPrimarySelectionDeviceV1 {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        ZWP_PRIMARY_SELECTION_DEVICE_V1
    }

    fn break_loops(&self) {
        break_device_loops(self);
    }
}

simple_add_obj!(ZwpPrimarySelectionDeviceV1);

#[derive(Debug, Error)]
pub enum ZwpPrimarySelectionDeviceV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(ZwpPrimarySelectionDeviceV1Error, ClientError);
