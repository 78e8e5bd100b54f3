//! Request execution
//!
//! The HTTP seam every provider call goes through.

pub mod transport;

pub use transport::{
    HttpDeleteRequest, HttpMultipartRequest, HttpTransport, HttpTransportRequest,
    HttpTransportResponse, MultipartFile, ReqwestTransport,
};
