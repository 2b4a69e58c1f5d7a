// src/services/pricing.rs
//
// Motor de preços: funções puras, sem I/O. Tudo que toca banco fica
// no coordenador (sales_service); aqui entra valor, sai valor.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{common::error::AppError, models::ledger::SaleLine};

/// Taxas usadas no fluxo de entrada de estoque.
///
/// Os padrões são 10% de desconto sobre o valor base e 18% de imposto
/// (gst) sobre o valor já descontado. São parâmetros nomeados justamente
/// para o chamador poder sobrescrever (via ambiente, na AppState).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    pub discount_rate: Decimal,
    pub tax_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            discount_rate: Decimal::new(10, 2), // 0.10
            tax_rate: Decimal::new(18, 2),      // 0.18
        }
    }
}

/// Resultado do cálculo de desconto/imposto sobre um valor base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountTaxBreakdown {
    pub discount: Decimal,
    pub tax: Decimal,
    /// base - desconto + imposto
    pub net_amount: Decimal,
}

/// Soma (preço corrente x quantidade) sobre todos os itens da venda.
/// Falha se algum produto não tem preço no lookup.
pub fn compute_sale_total(
    items: &[SaleLine],
    prices: &HashMap<Uuid, Decimal>,
) -> Result<Decimal, AppError> {
    let mut total = Decimal::ZERO;
    for item in items {
        let price = prices
            .get(&item.product_id)
            .ok_or(AppError::ProductNotFound(item.product_id))?;
        total += *price * Decimal::from(item.quantity);
    }
    Ok(total)
}

/// Desconto sobre o valor base; imposto sobre o valor já descontado.
pub fn compute_discount_and_tax(
    base_amount: Decimal,
    config: &PricingConfig,
) -> DiscountTaxBreakdown {
    let discount = base_amount * config.discount_rate;
    let taxable_amount = base_amount - discount;
    let tax = taxable_amount * config.tax_rate;

    DiscountTaxBreakdown {
        discount,
        tax,
        net_amount: taxable_amount + tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn desconto_e_imposto_com_taxas_padrao() {
        let breakdown = compute_discount_and_tax(dec("100.0"), &PricingConfig::default());

        assert_eq!(breakdown.discount, dec("10.0"));
        assert_eq!(breakdown.tax, dec("16.2"));
        assert_eq!(breakdown.net_amount, dec("106.2"));
    }

    #[test]
    fn calculo_e_deterministico() {
        let config = PricingConfig::default();
        let a = compute_discount_and_tax(dec("37.41"), &config);
        let b = compute_discount_and_tax(dec("37.41"), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn taxas_podem_ser_sobrescritas() {
        let config = PricingConfig {
            discount_rate: Decimal::ZERO,
            tax_rate: dec("0.25"),
        };
        let breakdown = compute_discount_and_tax(dec("200.0"), &config);

        assert_eq!(breakdown.discount, Decimal::ZERO);
        assert_eq!(breakdown.tax, dec("50.0"));
        assert_eq!(breakdown.net_amount, dec("250.0"));
    }

    #[test]
    fn base_zero_produz_zeros() {
        let breakdown = compute_discount_and_tax(Decimal::ZERO, &PricingConfig::default());
        assert_eq!(breakdown.net_amount, Decimal::ZERO);
    }

    #[test]
    fn total_da_venda_soma_preco_vezes_quantidade() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let mut prices = HashMap::new();
        prices.insert(p1, dec("12.50"));
        prices.insert(p2, dec("3.00"));

        let items = vec![
            SaleLine { product_id: p1, quantity: 2 },
            SaleLine { product_id: p2, quantity: 5 },
        ];

        let total = compute_sale_total(&items, &prices).unwrap();
        assert_eq!(total, dec("40.00"));
    }

    #[test]
    fn produto_sem_preco_falha_com_not_found() {
        let desconhecido = Uuid::new_v4();
        let items = vec![SaleLine { product_id: desconhecido, quantity: 1 }];

        let err = compute_sale_total(&items, &HashMap::new()).unwrap_err();
        match err {
            AppError::ProductNotFound(id) => assert_eq!(id, desconhecido),
            other => panic!("esperava ProductNotFound, veio {other:?}"),
        }
    }

    #[test]
    fn lista_vazia_soma_zero() {
        let total = compute_sale_total(&[], &HashMap::new()).unwrap();
        assert_eq!(total, Decimal::ZERO);
    }
}
