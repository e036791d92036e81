//! Splits a multi-target signal into per-target draft orders.

use super::Order;
use crate::risk::RiskAllocator;
use crate::signal::{OrderType, Signal};

/// Turns one signal into one draft order per target.
///
/// The allocator decides how much of the risk budget each target carries;
/// everything else is copied straight from the signal. A signal without
/// targets generates nothing; there is no implicit single order.
pub struct OrderGenerator {
    allocator: Box<dyn RiskAllocator>,
}

impl OrderGenerator {
    pub fn new(allocator: Box<dyn RiskAllocator>) -> Self {
        Self { allocator }
    }

    pub fn generate(&self, signal: &Signal) -> Vec<Order> {
        let weights = self.allocator.per_target_risks(signal);
        debug_assert_eq!(weights.len(), signal.targets.len());

        let n = signal.targets.len();
        signal
            .targets
            .iter()
            .zip(weights)
            .enumerate()
            .map(|(idx, (target, risk))| Order {
                symbol: signal.symbol.clone(),
                side: signal.side,
                order_type: signal.order_type,
                risk,
                price: (signal.order_type == OrderType::Limit).then_some(signal.entry),
                sl: signal.stop_loss,
                tp: Some(target.price),
                comment: format!("{} {}of{}", signal.comment, idx + 1, n)
                    .trim()
                    .to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::{EqualRisk, FibonacciRisk};
    use crate::signal::{Side, Target};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn signal(order_type: OrderType, targets: &[Decimal], sl: Option<Decimal>) -> Signal {
        Signal {
            symbol: "XAUUSD".to_string(),
            side: Side::Sell,
            order_type,
            entry: dec!(3278),
            targets: targets.iter().map(|&price| Target { price }).collect(),
            stop_loss: sl,
            comment: "Empire".to_string(),
            raw_source: String::new(),
        }
    }

    #[test]
    fn test_one_order_per_target() {
        let gen = OrderGenerator::new(Box::new(EqualRisk::new(dec!(1.0))));
        let sig = signal(
            OrderType::Limit,
            &[dec!(10), dec!(20), dec!(30)],
            Some(dec!(3290)),
        );
        let orders = gen.generate(&sig);
        assert_eq!(orders.len(), 3);

        for (idx, order) in orders.iter().enumerate() {
            assert_eq!(order.symbol, "XAUUSD");
            assert_eq!(order.side, Side::Sell);
            assert_eq!(order.risk, dec!(0.333));
            assert_eq!(order.price, Some(sig.entry), "limit orders keep the entry");
            assert_eq!(order.sl, Some(dec!(3290)));
            assert_eq!(order.tp, Some(sig.targets[idx].price));
            assert_eq!(order.comment, format!("Empire {}of3", idx + 1));
        }
    }

    #[test]
    fn test_market_order_has_no_price() {
        let gen = OrderGenerator::new(Box::new(EqualRisk::new(dec!(1.0))));
        let orders = gen.generate(&signal(OrderType::Market, &[dec!(100)], Some(dec!(2.9))));
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].price, None);
        assert!(orders[0].comment.ends_with("1of1"));
    }

    #[test]
    fn test_no_targets_generates_no_orders() {
        let gen = OrderGenerator::new(Box::new(EqualRisk::new(dec!(1.0))));
        assert!(gen.generate(&signal(OrderType::Market, &[], None)).is_empty());
    }

    #[test]
    fn test_fibonacci_weights_flow_into_orders() {
        let gen = OrderGenerator::new(Box::new(FibonacciRisk::new(dec!(1.0), true)));
        let sig = signal(
            OrderType::Limit,
            &[dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)],
            Some(dec!(0.5)),
        );
        let risks: Vec<Decimal> = gen.generate(&sig).iter().map(|o| o.risk).collect();
        assert_eq!(
            risks,
            vec![dec!(0.417), dec!(0.25), dec!(0.167), dec!(0.083), dec!(0.083)]
        );
    }

    #[test]
    fn test_empty_comment_leaves_bare_index() {
        let gen = OrderGenerator::new(Box::new(EqualRisk::new(dec!(1.0))));
        let mut sig = signal(OrderType::Market, &[dec!(100)], None);
        sig.comment = String::new();
        assert_eq!(gen.generate(&sig)[0].comment, "1of1");
    }
}
