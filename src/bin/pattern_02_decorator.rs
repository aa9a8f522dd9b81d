use colored::Colorize;
use std::io::{self, BufRead, Write};

// =============================================================================
// Decorator: coffee ordering
//
// A basic coffee is wrapped, one layer at a time, by additions that each
// raise the cost by a fixed increment and extend the description. Every
// layer owns exactly one inner beverage, so the order forms a singly
// linked chain with no cycles.
// =============================================================================

pub trait Beverage {
    fn cost(&self) -> f64;
    fn description(&self) -> String;
}

pub struct BasicCoffee;

impl Beverage for BasicCoffee {
    fn cost(&self) -> f64 {
        5.00
    }

    fn description(&self) -> String {
        "Basic Coffee".to_string()
    }
}

pub struct Milk {
    inner: Box<dyn Beverage>,
}

pub struct Sugar {
    inner: Box<dyn Beverage>,
}

pub struct Chocolate {
    inner: Box<dyn Beverage>,
}

impl Beverage for Milk {
    fn cost(&self) -> f64 {
        self.inner.cost() + 0.50
    }

    fn description(&self) -> String {
        format!("{} + Milk", self.inner.description())
    }
}

impl Beverage for Sugar {
    fn cost(&self) -> f64 {
        self.inner.cost() + 0.25
    }

    fn description(&self) -> String {
        format!("{} + Sugar", self.inner.description())
    }
}

impl Beverage for Chocolate {
    fn cost(&self) -> f64 {
        self.inner.cost() + 0.75
    }

    fn description(&self) -> String {
        format!("{} + Chocolate", self.inner.description())
    }
}

/// Menu of available additions, with the price shown to the customer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Addition {
    Milk,
    Sugar,
    Chocolate,
}

impl Addition {
    pub fn label(&self) -> &'static str {
        match self {
            Addition::Milk => "Milk",
            Addition::Sugar => "Sugar",
            Addition::Chocolate => "Chocolate",
        }
    }

    pub fn price(&self) -> f64 {
        match self {
            Addition::Milk => 0.50,
            Addition::Sugar => 0.25,
            Addition::Chocolate => 0.75,
        }
    }

    /// Wrap the current order in one more layer.
    pub fn wrap(&self, order: Box<dyn Beverage>) -> Box<dyn Beverage> {
        match self {
            Addition::Milk => Box::new(Milk { inner: order }),
            Addition::Sugar => Box::new(Sugar { inner: order }),
            Addition::Chocolate => Box::new(Chocolate { inner: order }),
        }
    }
}

const MENU: [Addition; 3] = [Addition::Milk, Addition::Sugar, Addition::Chocolate];

// =============================================================================
// Interactive driver
// =============================================================================

pub fn run<R: BufRead, W: Write>(mut input: R, out: &mut W) -> io::Result<()> {
    let mut order: Box<dyn Beverage> = Box::new(BasicCoffee);

    loop {
        writeln!(out, "\nCurrent Order: {}", order.description())?;
        writeln!(out, "Current Cost: ${:.2}", order.cost())?;
        writeln!(out, "\nAdditions:")?;
        for (i, addition) in MENU.iter().enumerate() {
            writeln!(out, "{}. {} (${:.2})", i + 1, addition.label(), addition.price())?;
        }
        writeln!(out, "4. Checkout")?;
        write!(out, "Choose an addition by entering the corresponding number: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "1" => order = Addition::Milk.wrap(order),
            "2" => order = Addition::Sugar.wrap(order),
            "3" => order = Addition::Chocolate.wrap(order),
            "4" => {
                writeln!(out, "\n{}", "Final Order:".bold())?;
                writeln!(out, "Description: {}", order.description())?;
                writeln!(out, "Total Cost: ${:.2}", order.cost())?;
                break;
            }
            _ => writeln!(out, "{}", "Invalid choice, please try again.".red())?,
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_base_coffee_constants() {
        let coffee = BasicCoffee;
        assert_eq!(coffee.cost(), 5.00);
        assert_eq!(coffee.description(), "Basic Coffee");
    }

    #[test]
    fn test_layers_sum_their_increments() {
        let order = Addition::Sugar.wrap(Addition::Milk.wrap(Box::new(BasicCoffee)));
        assert!((order.cost() - 5.75).abs() < 1e-9);
    }

    #[test]
    fn test_cost_is_order_independent() {
        let milk_first = Addition::Sugar.wrap(Addition::Milk.wrap(Box::new(BasicCoffee)));
        let sugar_first = Addition::Milk.wrap(Addition::Sugar.wrap(Box::new(BasicCoffee)));
        assert!((milk_first.cost() - sugar_first.cost()).abs() < 1e-9);
    }

    #[test]
    fn test_description_preserves_wrap_order() {
        let order = Addition::Sugar.wrap(Addition::Milk.wrap(Box::new(BasicCoffee)));
        assert_eq!(order.description(), "Basic Coffee + Milk + Sugar");

        let reversed = Addition::Milk.wrap(Addition::Sugar.wrap(Box::new(BasicCoffee)));
        assert_eq!(reversed.description(), "Basic Coffee + Sugar + Milk");
    }

    #[test]
    fn test_same_addition_can_stack() {
        let order = Addition::Milk.wrap(Addition::Milk.wrap(Box::new(BasicCoffee)));
        assert!((order.cost() - 6.00).abs() < 1e-9);
        assert_eq!(order.description(), "Basic Coffee + Milk + Milk");
    }

    #[test]
    fn test_checkout_prints_final_order() {
        colored::control::set_override(false);
        let input = Cursor::new("1\n2\n4\n");
        let mut out = Vec::new();
        run(input, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("Current Order: Basic Coffee + Milk"));
        assert!(output.contains("Description: Basic Coffee + Milk + Sugar"));
        assert!(output.contains("Total Cost: $5.75"));
    }

    #[test]
    fn test_invalid_choice_keeps_the_order() {
        colored::control::set_override(false);
        let input = Cursor::new("9\n4\n");
        let mut out = Vec::new();
        run(input, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("Invalid choice, please try again."));
        assert!(output.contains("Description: Basic Coffee\n"));
        assert!(output.contains("Total Cost: $5.00"));
    }
}
