pub mod actor;
pub mod entity;
pub mod error;
pub mod filter;
pub mod model;
pub mod permission;
pub mod role;
pub mod signature;
pub mod workflow;

pub use self::{
    actor::Actor,
    entity::Entity,
    filter::Filter,
    model::{
        Model,
        Registry,
    },
    permission::{
        Permission,
        PermissionSet,
    },
    role::{
        Role,
        Roles,
    },
    signature::Signature,
    workflow::{
        Blueprint,
        State,
        StateMachine,
        Transition,
    },
};
