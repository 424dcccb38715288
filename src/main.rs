use clap::{Parser, Subcommand};
use tracing::{error, info, Instrument};
use rocket_cart::{setup_tracing, Cart, CartConfig, CartSystem, ProductId, UpdateProductAmount};

#[derive(Parser, Debug)]
#[command(name = "rocket_cart")]
#[command(about = "Manage the storefront shopping cart")]
#[command(version)]
/// Command-line arguments.
struct Cli {
    /// Cart operation to run (shows the cart if omitted).
    #[command(subcommand)]
    command: Option<Command>,
}

/// Cart operations.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add { id: ProductId },
    /// Remove a product from the cart
    Remove { id: ProductId },
    /// Set the amount of a product already in the cart (zero or negative is ignored)
    Update {
        id: ProductId,
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }
    for item in cart.items() {
        println!(
            "{:>4}  {:<40} {:>3} x {:>8.2} = {:>9.2}",
            item.id(),
            item.product.title,
            item.amount,
            item.product.price,
            item.subtotal()
        );
    }
    println!("{} items, total {:.2}", cart.total_items(), cart.total());
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let command = Cli::parse().command.unwrap_or(Command::Show);

    let config = CartConfig::from_env().map_err(|e| e.to_string())?;
    let system = CartSystem::new(&config).map_err(|e| e.to_string())?;
    let client = system.cart_client.clone();

    let span = tracing::info_span!("command", command = ?command);
    let result = async {
        match command {
            Command::Show => client.cart().await.map(|cart| {
                print_cart(&cart);
                false
            }),
            Command::Add { id } => client.add_product(id).await,
            Command::Remove { id } => client.remove_product(id).await,
            Command::Update { id, amount } => {
                client.update_product_amount(UpdateProductAmount::new(id, amount)).await
            }
        }
    }
    .instrument(span)
    .await;

    match result {
        Ok(changed) => info!(changed, "Command completed"),
        Err(e) => error!(error = %e, "Command failed"),
    }

    drop(client);
    system.shutdown().await?;
    Ok(())
}
