pub mod fund;
pub mod nav;
pub mod request_params;
