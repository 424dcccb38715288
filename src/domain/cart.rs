use serde::{Deserialize, Serialize};
use super::product::{Product, ProductId};

/// A product paired with the quantity the user wants.
///
/// Serialized flat, so a stored item reads
/// `{"id":1,"title":"...","price":179.9,"image":"...","amount":2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl CartItem {
    pub fn new(product: Product, amount: u32) -> Self {
        Self { product, amount }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times amount.
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.amount)
    }
}

/// Ordered collection of cart items, in the order they were first added.
///
/// Every mutation returns a new `Cart`; the receiver is never touched. The
/// constructors keep ids unique and amounts positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from stored items.
    ///
    /// Later duplicates of an id and zero amounts are dropped so a hand-edited
    /// snapshot cannot break the uniqueness or positivity of the cart.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.amount == 0 || cart.find(item.id()).is_some() {
                continue;
            }
            cart.items.push(item);
        }
        cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Amount currently held for `id`, zero when absent.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.find(id).map(|item| item.amount).unwrap_or(0)
    }

    /// Sum of all amounts.
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Appends `product` with amount 1.
    ///
    /// Returns `None` if the product is already in the cart.
    pub fn with_product(&self, product: Product) -> Option<Cart> {
        if self.find(product.id).is_some() {
            return None;
        }
        let mut items = self.items.clone();
        items.push(CartItem::new(product, 1));
        Some(Cart { items })
    }

    /// Replaces the amount of `id`, keeping the position of every entry.
    ///
    /// Returns `None` if `id` is absent or `amount` is zero.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Option<Cart> {
        if amount == 0 {
            return None;
        }
        let index = self.items.iter().position(|item| item.id() == id)?;
        let mut items = self.items.clone();
        items[index].amount = amount;
        Some(Cart { items })
    }

    /// Removes `id`, keeping the relative order of the rest.
    ///
    /// Returns `None` if `id` is absent.
    pub fn without(&self, id: ProductId) -> Option<Cart> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        let mut items = self.items.clone();
        items.remove(index);
        Some(Cart { items })
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Cart::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
