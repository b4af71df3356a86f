use thiserror::Error;

use crate::infra::key_material::KeyLoadError;

/// Infrastructure errors that abort startup or the server loop.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Key material could not be loaded. Check PRIVATE_KEY_PATH and PUBLIC_KEY_PATH.")]
    KeyMaterial(#[from] KeyLoadError),

    #[error("TCP bind failed")]
    TcpBind(#[source] std::io::Error),

    #[error("Server error")]
    Server(#[source] std::io::Error),
}
