use {
    crate::{
        client::{Client, ClientError},
        ifs::ipc::{DataOfferId, OfferData, break_offer_loops, destroy_offer, receive_offer},
        object::{Interface, Object, ObjectId},
        wire::{
            ZWP_PRIMARY_SELECTION_OFFER_V1, ZwpPrimarySelectionOfferV1Id,
            zwp_primary_selection_offer_v1::Offer,
        },
    },
    std::rc::Rc,
    thiserror::Error,
    uapi::OwnedFd,
};

pub struct ZwpPrimarySelectionOfferV1 {
    pub id: ZwpPrimarySelectionOfferV1Id,
    pub offer_id: DataOfferId,
    pub client: Rc<Client>,
    pub(crate) data: OfferData,
}

impl ZwpPrimarySelectionOfferV1 {
    pub fn send_offer(&self, mime_type: &str) {
        self.client.event(Offer {
            self_id: self.id,
            mime_type: mime_type.to_string(),
        })
    }

    /// Asks the source to write the data for `mime_type` into `fd`. A no-op
    /// if the source has been cancelled in the meantime.
    pub fn receive(&self, mime_type: &str, fd: Rc<OwnedFd>) {
        receive_offer(self, mime_type, fd);
    }

    pub fn destroy(&self) -> Result<(), ZwpPrimarySelectionOfferV1Error> {
        destroy_offer(self);
        self.client.remove_obj(self)?;
        Ok(())
    }
}

impl Object for ZwpPrimarySelectionOfferV1 {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        ZWP_PRIMARY_SELECTION_OFFER_V1
    }

    fn break_loops(&self) {
        break_offer_loops(self);
    }
}

simple_add_obj!(ZwpPrimarySelectionOfferV1);

#[derive(Debug, Error)]
pub enum ZwpPrimarySelectionOfferV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(ZwpPrimarySelectionOfferV1Error, ClientError);
