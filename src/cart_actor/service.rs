use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};
use crate::api::CartApi;
use crate::clients::CartClient;
use crate::domain::{Cart, ProductId, UpdateProductAmount};
use crate::error::{ApiError, CartError, CartOperation};
use crate::messages::{CartRequest, ServiceResponse};
use crate::notify::Notifier;
use crate::storage::CartStorage;

/// Cart actor. Owns the current cart and handles one request at a time, so
/// requests never interleave even while a handler waits on the network.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
    api: Box<dyn CartApi>,
    storage: CartStorage,
    notifier: Box<dyn Notifier>,
}

impl CartService {
    pub fn new(
        buffer_size: usize,
        initial: Cart,
        api: impl CartApi + 'static,
        storage: CartStorage,
        notifier: impl Notifier + 'static,
    ) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            cart: initial,
            api: Box::new(api),
            storage,
            notifier: Box::new(notifier),
        };
        let client = CartClient::new(sender);
        (service, client)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!(items = self.cart.len(), "CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::GetCart { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.clone()));
                }
                CartRequest::AddProduct { product_id, respond_to } => {
                    self.handle_add_product(product_id, respond_to).await;
                }
                CartRequest::RemoveProduct { product_id, respond_to } => {
                    self.handle_remove_product(product_id, respond_to);
                }
                CartRequest::UpdateProductAmount { update, respond_to } => {
                    self.handle_update_product_amount(update, respond_to).await;
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!("CartService stopped");
    }

    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    async fn handle_add_product(&mut self, product_id: ProductId, respond_to: ServiceResponse<bool, CartError>) {
        debug!("Processing add_product request");

        let result = match self.add_product(product_id).await {
            Ok(cart) => Ok(self.commit(cart)),
            Err(e) => Err(self.reject(CartOperation::Add, e)),
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    fn handle_remove_product(&mut self, product_id: ProductId, respond_to: ServiceResponse<bool, CartError>) {
        debug!("Processing remove_product request");

        let result = match self.cart.without(product_id) {
            Some(cart) => Ok(self.commit(cart)),
            None => Err(self.reject(CartOperation::Remove, CartError::NotFound(product_id))),
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %update.product_id, amount = update.amount), skip(self, update, respond_to))]
    async fn handle_update_product_amount(
        &mut self,
        update: UpdateProductAmount,
        respond_to: ServiceResponse<bool, CartError>,
    ) {
        debug!("Processing update_product_amount request");

        if update.amount <= 0 {
            debug!("Non-positive amount ignored");
            let _ = respond_to.send(Ok(false));
            return;
        }

        let result = match self.update_product_amount(update).await {
            Ok(cart) => Ok(self.commit(cart)),
            Err(e) => Err(self.reject(CartOperation::Update, e)),
        };

        let _ = respond_to.send(result);
    }

    /// Computes the cart that results from adding one unit of `product_id`.
    async fn add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let current = self.cart.amount_of(product_id);
        let available = self.api.stock(product_id).await?;
        let desired = current.saturating_add(1);

        if desired > available {
            return Err(CartError::StockExceeded {
                product_id,
                requested: i64::from(desired),
                available,
            });
        }

        if current > 0 {
            return self
                .cart
                .with_amount(product_id, desired)
                .ok_or(CartError::NotFound(product_id));
        }

        let product = self.api.product(product_id).await?;
        if product.id != product_id {
            return Err(ApiError::Parse(format!(
                "catalog answered product {} for id {}",
                product.id, product_id
            ))
            .into());
        }
        info!(product_title = %product.title, "Product fetched from catalog");

        self.cart
            .with_product(product)
            .ok_or(CartError::NotFound(product_id))
    }

    /// Computes the cart with `update.amount` set for `update.product_id`.
    ///
    /// Expects a positive amount.
    async fn update_product_amount(&self, update: UpdateProductAmount) -> Result<Cart, CartError> {
        let available = self.api.stock(update.product_id).await?;

        if update.amount > i64::from(available) {
            return Err(CartError::StockExceeded {
                product_id: update.product_id,
                requested: update.amount,
                available,
            });
        }

        // amount is within 1..=available here, so it fits in u32
        let amount = u32::try_from(update.amount).map_err(|_| CartError::StockExceeded {
            product_id: update.product_id,
            requested: update.amount,
            available,
        })?;

        self.cart
            .with_amount(update.product_id, amount)
            .ok_or(CartError::NotFound(update.product_id))
    }

    /// Replaces the current cart with `cart` and persists it.
    ///
    /// Returns whether the contents changed. Nothing is written when they did
    /// not. A failed write is logged and does not undo the in-memory commit.
    fn commit(&mut self, cart: Cart) -> bool {
        if cart == self.cart {
            debug!("Cart unchanged, nothing to save");
            return false;
        }

        self.cart = cart;
        if let Err(e) = self.storage.save(&self.cart) {
            error!(error = %e, "Failed to persist cart");
        }

        info!(items = self.cart.len(), total_items = self.cart.total_items(), "Cart committed");
        true
    }

    /// Notifies the user about a failed operation and hands the error back.
    fn reject(&self, operation: CartOperation, error: CartError) -> CartError {
        match &error {
            CartError::StockExceeded { requested, available, .. } => {
                warn!(requested = *requested, available = *available, "Insufficient stock");
            }
            CartError::NotFound(_) => {
                warn!("Product not in cart");
            }
            other => {
                error!(error = %other, "Cart operation failed");
            }
        }

        self.notifier.error(operation.message_for(&error));
        error
    }
}
