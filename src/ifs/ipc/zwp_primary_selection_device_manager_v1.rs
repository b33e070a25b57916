use {
    crate::{
        client::{Client, ClientError},
        globals::{Global, GlobalName, GlobalsError},
        ifs::ipc::{
            zwp_primary_selection_device_v1::ZwpPrimarySelectionDeviceV1,
            zwp_primary_selection_source_v1::ZwpPrimarySelectionSourceV1,
        },
        object::{Interface, Object, ObjectId},
        wire::{
            WlSeatId, ZWP_PRIMARY_SELECTION_DEVICE_MANAGER_V1, ZwpPrimarySelectionDeviceManagerV1Id,
            ZwpPrimarySelectionDeviceV1Id, ZwpPrimarySelectionSourceV1Id,
        },
    },
    std::rc::Rc,
    thiserror::Error,
};

pub struct ZwpPrimarySelectionDeviceManagerV1Global {
    name: GlobalName,
}

impl ZwpPrimarySelectionDeviceManagerV1Global {
    pub fn new(name: GlobalName) -> Self {
        Self { name }
    }

    pub fn bind_(
        self: &Rc<Self>,
        id: ZwpPrimarySelectionDeviceManagerV1Id,
        client: &Rc<Client>,
        version: u32,
    ) -> Result<Rc<ZwpPrimarySelectionDeviceManagerV1>, ClientError> {
        let obj = Rc::new(ZwpPrimarySelectionDeviceManagerV1 {
            id,
            client: client.clone(),
            version,
        });
        client.add_client_obj(&obj)?;
        Ok(obj)
    }
}

impl Global for ZwpPrimarySelectionDeviceManagerV1Global {
    fn name(&self) -> GlobalName {
        self.name
    }

    fn interface(&self) -> Interface {
        ZWP_PRIMARY_SELECTION_DEVICE_MANAGER_V1
    }

    fn version(&self) -> u32 {
        1
    }

    fn bind(
        self: Rc<Self>,
        client: &Rc<Client>,
        id: ObjectId,
        version: u32,
    ) -> Result<(), GlobalsError> {
        self.bind_(id.into(), client, version)?;
        Ok(())
    }
}

pub struct ZwpPrimarySelectionDeviceManagerV1 {
    pub id: ZwpPrimarySelectionDeviceManagerV1Id,
    pub client: Rc<Client>,
    pub version: u32,
}

impl ZwpPrimarySelectionDeviceManagerV1 {
    pub fn create_source(
        &self,
        id: ZwpPrimarySelectionSourceV1Id,
    ) -> Result<Rc<ZwpPrimarySelectionSourceV1>, ZwpPrimarySelectionDeviceManagerV1Error> {
        let src = Rc::new(ZwpPrimarySelectionSourceV1::new(id, &self.client));
        self.client.add_client_obj(&src)?;
        Ok(src)
    }

    pub fn get_device(
        &self,
        id: ZwpPrimarySelectionDeviceV1Id,
        seat: WlSeatId,
    ) -> Result<Rc<ZwpPrimarySelectionDeviceV1>, ZwpPrimarySelectionDeviceManagerV1Error> {
        let dev = Rc::new(ZwpPrimarySelectionDeviceV1::new(
            id,
            &self.client,
            self.version,
            seat,
        ));
        self.client.add_client_obj(&dev)?;
        self.client.state.selection.add_device(&dev);
        Ok(dev)
    }

    /// Destroys the manager. Sources and devices created through it live on.
    pub fn destroy(&self) -> Result<(), ZwpPrimarySelectionDeviceManagerV1Error> {
        self.client.remove_obj(self)?;
        Ok(())
    }
}

impl Object for ZwpPrimarySelectionDeviceManagerV1 {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        ZWP_PRIMARY_SELECTION_DEVICE_MANAGER_V1
    }
}

simple_add_obj!(ZwpPrimarySelectionDeviceManagerV1);

#[derive(Debug, Error)]
pub enum ZwpPrimarySelectionDeviceManagerV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(ZwpPrimarySelectionDeviceManagerV1Error, ClientError);
