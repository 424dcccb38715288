use tokio::sync::oneshot;
use crate::domain::{Cart, ProductId, UpdateProductAmount};
use crate::error::CartError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed messages for the cart actor. Each variant carries its parameters and
/// a oneshot channel for the response.
///
/// Mutating requests answer `true` when the committed cart differs from the
/// previous one.
#[derive(Debug)]
pub enum CartRequest {
    GetCart {
        respond_to: ServiceResponse<Cart, CartError>,
    },
    AddProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<bool, CartError>,
    },
    RemoveProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<bool, CartError>,
    },
    UpdateProductAmount {
        update: UpdateProductAmount,
        respond_to: ServiceResponse<bool, CartError>,
    },
    Shutdown,
}
