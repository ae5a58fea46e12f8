//! # Quote Commands
//!
//! Stay simulator: prices a prospective stay and renders shareable text.
//! Handing the text to a share sheet or clipboard is up to the caller.

use pousada_core::{quote as price_stay, CoreError, Meal, MealPlan, Quote};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::{ConfigState, FrontDesk};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Missing or below 1 counts as 1; above ten years is rejected.
    #[serde(default)]
    pub nights: Option<i64>,
    /// Missing or negative counts as 0.
    #[serde(default)]
    pub daily_rate: Option<f64>,
    #[serde(default)]
    pub meals: MealPlan,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub nights: i64,
    pub daily_rate_cents: i64,
    pub meals: MealPlan,
    pub room_total_cents: i64,
    pub meal_package_total_cents: i64,
    pub grand_total_cents: i64,
    pub share_text: String,
}

pub fn quote(desk: &FrontDesk, request: QuoteRequest) -> Result<QuoteResponse, ApiError> {
    let quote = price_stay(
        request.nights.unwrap_or(1),
        request.daily_rate.unwrap_or(0.0),
        request.meals,
        &desk.hotel().products,
    )
    .map_err(CoreError::from)?;

    Ok(QuoteResponse {
        nights: quote.nights,
        daily_rate_cents: quote.daily_rate.cents(),
        meals: quote.meals,
        room_total_cents: quote.room_total.cents(),
        meal_package_total_cents: quote.meal_package_total.cents(),
        grand_total_cents: quote.grand_total.cents(),
        share_text: share_text(desk.config(), &quote),
    })
}

fn yes_no(included: bool) -> &'static str {
    if included {
        "Sim"
    } else {
        "Não"
    }
}

/// Plain-text quote for messaging apps (`*bold*` markers).
pub fn share_text(config: &ConfigState, quote: &Quote) -> String {
    let money = |amount| config.format_currency(amount);
    let mut lines = vec![
        format!("*Orçamento de Hospedagem - {}*", config.hotel_name),
        String::new(),
        "*Detalhes:*".to_string(),
        format!("- Número de Diárias: {}", quote.nights),
        format!("- Valor da Diária: {}", money(quote.daily_rate)),
        String::new(),
        "*Pacotes Inclusos:*".to_string(),
    ];

    for (meal, label) in [
        (Meal::Breakfast, "Café da Manhã"),
        (Meal::Lunch, "Almoço"),
        (Meal::Dinner, "Jantar"),
    ] {
        lines.push(format!("- {}: {}", label, yes_no(quote.meals.includes(meal))));
    }

    lines.extend([
        String::new(),
        "*Resumo Financeiro:*".to_string(),
        format!("- Total Hospedagem: {}", money(quote.room_total)),
        format!("- Total Pacotes Refeição: {}", money(quote.meal_package_total)),
        "-".repeat(34),
        format!("*VALOR TOTAL:* *{}*", money(quote.grand_total)),
    ]);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pousada_core::Hotel;

    #[test]
    fn test_share_text() {
        let mut hotel = Hotel::new();
        hotel.ensure_default_meals();
        let meals = MealPlan {
            breakfast: true,
            lunch: false,
            dinner: false,
        };
        let quote = price_stay(3, 150.0, meals, &hotel.products).unwrap();
        let config = ConfigState {
            hotel_name: "Pousada do Sol".to_string(),
            ..ConfigState::default()
        };

        let text = share_text(&config, &quote);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "*Orçamento de Hospedagem - Pousada do Sol*");
        assert!(lines.contains(&"- Número de Diárias: 3"));
        assert!(lines.contains(&"- Valor da Diária: R$ 150,00"));
        assert!(lines.contains(&"- Café da Manhã: Sim"));
        assert!(lines.contains(&"- Jantar: Não"));
        assert!(lines.contains(&"- Total Hospedagem: R$ 450,00"));
        assert!(lines.contains(&"- Total Pacotes Refeição: R$ 90,00"));
        assert_eq!(lines.last(), Some(&"*VALOR TOTAL:* *R$ 540,00*"));
    }
}
