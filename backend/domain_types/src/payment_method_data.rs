use hyperswitch_masking::Secret;

#[derive(Debug, Clone)]
pub enum PaymentMethodData {
    Card(Card),
}

impl PaymentMethodData {
    pub fn get_card_holder_name(&self) -> Option<&Secret<String>> {
        match self {
            Self::Card(card) => card.card_holder_name.as_ref(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Card {
    pub card_number: Secret<String>,
    pub card_exp_month: Secret<String>,
    pub card_exp_year: Secret<String>,
    pub card_cvc: Secret<String>,
    pub card_holder_name: Option<Secret<String>>,
}
