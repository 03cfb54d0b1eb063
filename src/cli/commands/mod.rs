pub mod activate;
pub mod backups;
pub mod create;
pub mod current;
pub mod delete;
pub mod list;
pub mod restore;
pub mod show;
pub mod status;
pub mod update;
pub mod write_cmd;
