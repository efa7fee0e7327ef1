//! # Command Line
//!
//! Argument definitions for the `atlas` binary.

use atlas_core::{OrderForm, ProductSelection};
use clap::{Args, Parser, Subcommand};

/// Storefront cart from the command line.
///
/// The cart is saved after every change and restored on the next run.
#[derive(Debug, Parser)]
#[command(name = "atlas", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the cart with its totals
    Show,

    /// Add a product to the cart
    Add {
        #[command(flatten)]
        product: ProductArgs,

        /// How many to add (non-positive adds one)
        #[arg(long, short, allow_negative_numbers = true)]
        quantity: Option<i64>,
    },

    /// Set the quantity of a line (zero or less removes it)
    Update {
        #[command(flatten)]
        line: LineArgs,

        #[arg(long, short, allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line from the cart
    Remove {
        #[command(flatten)]
        line: LineArgs,
    },

    /// Empty the cart
    Clear,

    /// Place an order for the cart contents
    Checkout(CheckoutArgs),

    /// Print the effective configuration
    Config,
}

/// Identifies one cart line.
#[derive(Debug, Args)]
pub struct LineArgs {
    /// Product id
    #[arg(long)]
    pub id: String,

    /// Variant, e.g. "2-person"
    #[arg(long)]
    pub variant: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product id
    #[arg(long)]
    pub id: String,

    /// Variant, e.g. "2-person"
    #[arg(long)]
    pub variant: Option<String>,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unit price in so'm
    #[arg(long, allow_negative_numbers = true)]
    pub price: i64,

    /// Image path or URL
    #[arg(long, default_value = "")]
    pub image: String,
}

impl From<ProductArgs> for ProductSelection {
    fn from(args: ProductArgs) -> Self {
        let selection = ProductSelection::new(args.id, args.name, args.price, args.image);
        match args.variant {
            Some(variant) => selection.with_variant(variant),
            None => selection,
        }
    }
}

/// Order form fields. Missing values are reported by form validation
/// rather than by the argument parser.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[arg(long, default_value = "")]
    pub full_name: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub address: String,

    /// Accept the terms of sale
    #[arg(long)]
    pub agree_to_terms: bool,
}

impl From<CheckoutArgs> for OrderForm {
    fn from(args: CheckoutArgs) -> Self {
        OrderForm {
            full_name: args.full_name,
            phone: args.phone,
            address: args.address,
            agree_to_terms: args.agree_to_terms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "atlas", "add", "--id", "super-satin", "--variant", "2-person", "--name",
            "Super Satin", "--price", "350000", "-q", "2",
        ])
        .unwrap();

        let Command::Add { product, quantity } = cli.command else {
            panic!("expected add");
        };
        assert_eq!(quantity, Some(2));

        let selection = ProductSelection::from(product);
        assert_eq!(selection.variant.as_deref(), Some("2-person"));
        assert_eq!(selection.price, 350_000);
        assert_eq!(selection.image, "");
    }

    #[test]
    fn test_parse_update_with_negative_quantity() {
        let cli =
            Cli::try_parse_from(["atlas", "update", "--id", "pastel-1", "--quantity", "-5"]).unwrap();

        let Command::Update { line, quantity } = cli.command else {
            panic!("expected update");
        };
        assert_eq!(line.id, "pastel-1");
        assert!(line.variant.is_none());
        assert_eq!(quantity, -5);
    }

    #[test]
    fn test_parse_checkout_defaults() {
        let cli = Cli::try_parse_from(["atlas", "checkout", "--phone", "+998 90"]).unwrap();

        let Command::Checkout(args) = cli.command else {
            panic!("expected checkout");
        };
        let form = OrderForm::from(args);
        assert_eq!(form.phone, "+998 90");
        assert!(form.full_name.is_empty());
        assert!(!form.agree_to_terms);
    }
}
