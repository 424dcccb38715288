use tokio::sync::mpsc;
use tracing::{debug, instrument};
use crate::domain::{Cart, ProductId, UpdateProductAmount};
use crate::error::CartError;
use crate::messages::CartRequest;

/// Client for interacting with the cart actor.
///
/// This is the surface handed to the UI layer. Every mutating method has
/// already notified the user by the time it returns an error; the error is
/// returned so callers can tell the failure kinds apart.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|_| CartError::ServiceUnavailable("Actor closed".to_string()))
    }
}

client_method!(CartClient => fn cart() -> Cart as CartRequest::GetCart);
client_method!(CartClient => fn add_product(product_id: ProductId) -> bool as CartRequest::AddProduct);
client_method!(CartClient => fn remove_product(product_id: ProductId) -> bool as CartRequest::RemoveProduct);
client_method!(CartClient => fn update_product_amount(update: UpdateProductAmount) -> bool as CartRequest::UpdateProductAmount);
