//! Cart slice.
//!
//! Purely local state: nothing here touches the network, so there is no
//! loading or error handling. Placing the cart as an order goes through the
//! orders slice.

use crate::app::ClientEnvironment;
use cucina_core::{effect::Effect, reducer::Reducer, SmallVec};
use cucina_types::{ItemId, MenuItem, OrderLine};

/// One cart entry: an item and how many of it.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// The item in the cart
    pub item: MenuItem,

    /// How many of it
    pub quantity: u32,
}

impl CartLine {
    /// Convert the cart line to an order line, capturing name and price
    #[must_use]
    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            item_id: self.item.id,
            item_name: self.item.item_name.clone(),
            quantity: self.quantity,
            price_cents: self.item.price_cents,
        }
    }
}

/// Slice state for the cart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    /// Current cart contents
    pub lines: Vec<CartLine>,
}

impl CartState {
    /// Cart total in cents
    #[must_use]
    pub fn total_cents(&self) -> i64 {
        self.lines
            .iter()
            .map(|line| line.item.price_cents * i64::from(line.quantity))
            .sum()
    }

    /// Convert the cart to order lines for placement
    #[must_use]
    pub fn to_order_lines(&self) -> Vec<OrderLine> {
        self.lines.iter().map(CartLine::to_order_line).collect()
    }
}

/// Messages owned by the cart slice.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add one of an item (incrementing the quantity if already present)
    Add(MenuItem),

    /// Remove an item entirely
    Remove(ItemId),

    /// Set an item's quantity; zero removes the line
    SetQuantity(ItemId, u32),

    /// Empty the cart
    Clear,
}

/// Reducer for the cart slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartReducer;

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::Add(item) => {
                match state.lines.iter_mut().find(|line| line.item.id == item.id) {
                    Some(line) => line.quantity += 1,
                    None => state.lines.push(CartLine { item, quantity: 1 }),
                }
            },
            CartAction::Remove(id) => {
                state.lines.retain(|line| line.item.id != id);
            },
            CartAction::SetQuantity(id, quantity) => {
                if quantity == 0 {
                    state.lines.retain(|line| line.item.id != id);
                } else if let Some(line) =
                    state.lines.iter_mut().find(|line| line.item.id == id)
                {
                    line.quantity = quantity;
                }
            },
            CartAction::Clear => state.lines.clear(),
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::app::ClientEnvironment;
    use cucina_testing::{assertions, ReducerTest};
    use std::sync::Arc;

    fn env() -> ClientEnvironment {
        ClientEnvironment::new(Arc::new(MockApi::new()))
    }

    fn item(name: &str, price_cents: i64) -> MenuItem {
        MenuItem {
            id: ItemId::new(),
            item_name: name.into(),
            description: None,
            category: "Pizza".into(),
            price_cents,
            image_src: None,
            is_available: true,
        }
    }

    #[test]
    fn adding_the_same_item_twice_bumps_the_quantity() {
        let margherita = item("Margherita", 600);
        let mut state = CartState::default();

        let _ = CartReducer.reduce(&mut state, CartAction::Add(margherita.clone()), &env());
        let _ = CartReducer.reduce(&mut state, CartAction::Add(margherita), &env());

        assert_eq!(state.lines.len(), 1);
        assert_eq!(state.lines[0].quantity, 2);
        assert_eq!(state.total_cents(), 1200);
    }

    #[test]
    fn setting_quantity_to_zero_removes_the_line() {
        let coke = item("Coke", 250);
        let id = coke.id;

        let mut state = CartState::default();
        let _ = CartReducer.reduce(&mut state, CartAction::Add(coke), &env());
        let _ = CartReducer.reduce(&mut state, CartAction::SetQuantity(id, 0), &env());

        assert!(state.lines.is_empty());
    }

    #[test]
    fn cart_actions_produce_no_effects() {
        ReducerTest::new(CartReducer)
            .with_env(env())
            .given_state(CartState::default())
            .when_action(CartAction::Clear)
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn order_lines_capture_name_and_price() {
        let tiramisu = item("Tiramisu", 700);
        let mut state = CartState::default();
        let _ = CartReducer.reduce(&mut state, CartAction::Add(tiramisu.clone()), &env());
        let _ = CartReducer.reduce(&mut state, CartAction::SetQuantity(tiramisu.id, 3), &env());

        let lines = state.to_order_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].item_name, "Tiramisu");
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].total_cents(), 2100);
    }
}
