use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

// =============================================================================
// Observer: stock monitoring
//
// A Stock subject keeps per-product quantities and pushes every change,
// synchronously and in subscription order, to the stores and warehouses
// listening for it.
// =============================================================================

pub trait StockObserver {
    /// Stable identity used for subscribe/unsubscribe bookkeeping.
    fn id(&self) -> &str;
    fn notify(&self, product: &str, quantity: u32);
}

pub struct Store {
    name: String,
}

impl Store {
    pub fn new(name: impl Into<String>) -> Self {
        Store { name: name.into() }
    }
}

impl StockObserver for Store {
    fn id(&self) -> &str {
        &self.name
    }

    fn notify(&self, product: &str, quantity: u32) {
        println!(
            "Store {} notified: {} stock updated to {} units.",
            self.name, product, quantity
        );
    }
}

pub struct Warehouse {
    location: String,
}

impl Warehouse {
    pub fn new(location: impl Into<String>) -> Self {
        Warehouse {
            location: location.into(),
        }
    }
}

impl StockObserver for Warehouse {
    fn id(&self) -> &str {
        &self.location
    }

    fn notify(&self, product: &str, quantity: u32) {
        println!(
            "Warehouse at {} notified: {} stock updated to {} units.",
            self.location, product, quantity
        );
    }
}

#[derive(Default)]
pub struct Stock {
    observers: Vec<Rc<dyn StockObserver>>,
    products: BTreeMap<String, u32>,
}

impl Stock {
    pub fn new() -> Self {
        Stock::default()
    }

    /// Register an observer. Subscribing the same id twice is a no-op, so
    /// no listener is ever notified more than once per change.
    pub fn subscribe(&mut self, observer: Rc<dyn StockObserver>) {
        if self.observers.iter().any(|o| o.id() == observer.id()) {
            return;
        }
        self.observers.push(observer);
    }

    /// Remove an observer by id. Removing an absent id is a no-op.
    pub fn unsubscribe(&mut self, id: &str) {
        self.observers.retain(|o| o.id() != id);
    }

    pub fn contains(&self, product: &str) -> bool {
        self.products.contains_key(product)
    }

    pub fn quantity(&self, product: &str) -> Option<u32> {
        self.products.get(product).copied()
    }

    pub fn products(&self) -> impl Iterator<Item = (&str, u32)> {
        self.products.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    /// Upsert a product quantity and notify every subscriber.
    ///
    /// The observer list is snapshotted before the pass, so a subscriber
    /// removed mid-pass still sees the change that was in flight.
    pub fn set_quantity(&mut self, product: &str, quantity: u32) {
        self.products.insert(product.to_string(), quantity);
        let pass: Vec<Rc<dyn StockObserver>> = self.observers.clone();
        for observer in pass {
            observer.notify(product, quantity);
        }
    }
}

// =============================================================================
// Interactive driver
// =============================================================================

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> io::Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    read_line(input)
}

pub fn run<R: BufRead, W: Write>(mut input: R, out: &mut W) -> io::Result<()> {
    let mut stock = Stock::new();
    stock.subscribe(Rc::new(Store::new("Main Street")));
    stock.subscribe(Rc::new(Store::new("Second Avenue")));
    stock.subscribe(Rc::new(Warehouse::new("Central Warehouse")));

    loop {
        writeln!(out, "\n--- Stock Management System ---")?;
        writeln!(out, "1. Add Product")?;
        writeln!(out, "2. Update Stock")?;
        writeln!(out, "3. Show Products")?;
        writeln!(out, "4. Exit")?;

        let Some(choice) = prompt(&mut input, out, "Choose an option: ")? else {
            writeln!(out, "Exiting the system.")?;
            break;
        };

        match choice.as_str() {
            "1" => {
                let Some(name) = prompt(&mut input, out, "Enter product name: ")? else {
                    break;
                };
                let Some(quantity) = prompt(&mut input, out, "Enter initial quantity: ")? else {
                    break;
                };
                match quantity.parse::<u32>() {
                    Ok(quantity) => stock.set_quantity(&name, quantity),
                    Err(_) => writeln!(
                        out,
                        "{}",
                        "Invalid quantity. Please enter a whole number.".red()
                    )?,
                }
            }
            "2" => {
                let Some(name) = prompt(&mut input, out, "Enter product name: ")? else {
                    break;
                };
                if !stock.contains(&name) {
                    writeln!(out, "Product '{name}' does not exist.")?;
                    continue;
                }
                let Some(quantity) = prompt(&mut input, out, "Enter new quantity: ")? else {
                    break;
                };
                match quantity.parse::<u32>() {
                    Ok(quantity) => stock.set_quantity(&name, quantity),
                    Err(_) => writeln!(
                        out,
                        "{}",
                        "Invalid quantity. Please enter a whole number.".red()
                    )?,
                }
            }
            "3" => {
                writeln!(out, "\n{}", "Current Products and Quantities:".bold())?;
                for (product, quantity) in stock.products() {
                    writeln!(out, "{product}: {quantity} units")?;
                }
            }
            "4" => {
                writeln!(out, "Exiting the system.")?;
                break;
            }
            _ => writeln!(out, "{}", "Invalid option. Please try again.".red())?,
        }
    }

    Ok(())
}

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    run(stdin.lock(), &mut io::stdout())
}

// =============================================================================
// Tests
// =============================================================================
