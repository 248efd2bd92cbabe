//! Shop prices.

use crate::cards::CardRarity;
use crate::core::ShopConfig;

/// Base price for a rarity tier.
#[must_use]
pub fn base_price(config: &ShopConfig, rarity: CardRarity) -> u32 {
    config.prices.get(rarity)
}

/// Price of a card in a slot: premium slots cost `ceil(base * multiplier)`.
#[must_use]
pub fn slot_price(config: &ShopConfig, rarity: CardRarity, premium: bool) -> u32 {
    let base = base_price(config, rarity);
    if premium {
        (f64::from(base) * config.premium_multiplier.max(0.0)).ceil() as u32
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premium_price_rounds_up() {
        let config = ShopConfig::default();
        assert_eq!(slot_price(&config, CardRarity::Common, false), 25);
        assert_eq!(slot_price(&config, CardRarity::Common, true), 38);
        assert_eq!(slot_price(&config, CardRarity::Rare, true), 120);
        assert_eq!(slot_price(&config, CardRarity::Legendary, true), 330);
    }

    #[test]
    fn test_custom_multiplier() {
        let config = ShopConfig::default().with_premium_multiplier(1.0);
        assert_eq!(slot_price(&config, CardRarity::Epic, true), 130);
    }
}
