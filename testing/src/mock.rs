use mockall::mock;
use wrpaccore::{
    entity::Entity,
    error::{
        BackendError,
        Error,
    },
    model::Model,
    permission::{
        PermissionSet,
        PermissionSource,
    },
};

mock! {
    pub Source {}

    impl PermissionSource for Source {
        fn snapshot(&self) -> Result<PermissionSet, BackendError>;
    }
}

mock! {
    pub Row {}

    impl Entity for Row {
        fn model(&self) -> &Model;
        fn attribute(&self, name: &str) -> Result<String, Error>;
        fn is_related(&self, relationship: &str, actor: &str) -> bool;
    }
}
