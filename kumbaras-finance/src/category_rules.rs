//! Deterministic rule table mapping statement text, sign, weekday and the
//! bank's own category to kumbaras' `(Category, subcategory)` pairs.
//!
//! Rules are evaluated in table order and the first match wins, so a more
//! specific rule must sit above any broader rule whose keywords could also
//! match its text (the owner's name appears in transfers that also say
//! `ΚΑΤΑΘΕΣΗ`; `BARBER` contains `BAR`).

use chrono::Weekday;
use kumbaras_core::Category;
use kumbaras_core::taxonomy as sub;
use kumbaras_core::time::is_weekend;

const OWNER_ALIASES: &[&str] = &["TINIAKOS", "ΤΗΝΙΑΚΟΣ"];
const PAYROLL: &[&str] = &["ΜΙΣΘΟΔΟΣΙΑ"];
const DEPOSIT: &[&str] = &["ΚΑΤΑΘΕΣΗ"];
const RENT: &[&str] = &["ΕΝΟΙΚ", "ENOIK"];
const UTILITIES: &[&str] = &[
    "COSMOTE", "VODAFONE", "NOVA", "WIND", "DEI", "PROTERGIA", "EYDAP", "VOLTON", "KOINOXR",
];
const SUPERMARKETS: &[&str] = &[
    "SKLAVENITIS",
    "LIDL",
    "MARKET IN",
    "AB VASSILOPOULOS",
    "MY MARKET",
    "KRITIKOS",
    "MASOUTIS",
    "BAZAAR",
    "GALAXIAS",
    "AV SHOP",
    "PAPAGIA",
    "KOUOLITY",
    "QUALITY FOODS",
];
// Greek-lettered spellings of WOLT show up in card descriptors.
const DELIVERY: &[&str] = &[
    "WOLT", "WOΛT", "WΟΛΤ", "E-FOOD", "EFOOD", "BOX", "PIZZA", "BURGER", "SOUVLAKI",
];
const DINING: &[&str] = &[
    // coffee
    "CAFE",
    "COFFEE",
    "GREGORYS",
    "GRIGORIS",
    "EVEREST",
    "FOURNOS",
    "KYLIKEIO",
    "MAMA JAY",
    "RUDU",
    "DILIEN",
    "GEFSINUS",
    "KARADIMAS",
    // eating out
    "RESTAURANT",
    "TAVERNA",
    "BAR",
    "CLUB",
    "ESTIATORIA",
    "HOLY GINGER",
    "PINAKAS",
];
const ENTERTAINMENT: &[&str] = &[
    "NETFLIX", "SPOTIFY", "YOUTUBE", "CINEMA", "THEATER", "TICKET", "VIVA", "MORE.GR",
];
const TECH_AND_HOME: &[&str] = &[
    "PUBLIC",
    "PLAISIO",
    "ISTORM",
    "GERMANOS",
    "KOTSOVOLOS",
    "APPLE STORE",
    "APPLE.COM",
    "ELECTRONICS",
    "IKEA",
    "LEROY",
    "JUMBO",
    "PRACTIKER",
    "E-SHOP",
];
const CLOTHING: &[&str] = &[
    "ZARA",
    "H&M",
    "HM ",
    "BSB",
    "ATTICA",
    "MAZARAKI",
    "MICHALIK",
    "VANIKIOTI",
    "ACCESSORIES",
    "CLOTHES",
    "SHOES",
    "INTERSPORT",
    "ELLE",
    "ARTOPOIIMATA",
];
const HEALTH_AND_BEAUTY: &[&str] = &[
    "HONDOS", "SEPHORA", "BEAUTY", "HAIR", "BARBER", "PHARMACY", "FARMAKEIO", "DOCTOR",
    "HOSPITAL", "IATROS",
];
const VICE: &[&str] = &["IQOS"];
const PEER_TRANSFERS: &[&str] = &["IRIS", "YPER", "ΥΠΕΡ"];
const TRANSPORT: &[&str] = &[
    "UBER", "BOLT", "BEAT", "FREENOW", "OASA", "SHELL", "EKO", "AVIN", "AEGEAN",
];
const FINTECH: &[&str] = &["REVOLUT", "PAYPAL", "TOP UP"];

const BANK_RESTAURANTS: &[&str] = &["ΕΣΤΙΑΤΟΡΙΑ"];
const BANK_SUPERMARKET: &[&str] = &["SUPERMARKET"];
const BANK_CLOTHING: &[&str] = &["ΡΟΥΧΙΣΜΟΣ", "ΑΞΕΣΟΥΑΡ"];
const BANK_HEALTH: &[&str] = &["ΥΓΕΙΑ"];
const BANK_TECH: &[&str] = &["ΤΕΧΝΟΛΟΓΙΑ"];

/// Substrings of which any one is enough to match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keywords.into_iter().map(Into::into).collect())
    }

    /// `text` must already be normalized.
    pub fn matches(&self, text: &str) -> bool {
        self.0.iter().any(|kw| text.contains(kw.as_str()))
    }

    pub fn keywords(&self) -> &[String] {
        &self.0
    }
}

impl From<&[&str]> for KeywordSet {
    fn from(keywords: &[&str]) -> Self {
        Self::new(keywords.iter().copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// amount > 0
    Inflow,
    /// amount < 0
    Outflow,
}

impl Sign {
    pub fn holds(&self, amount: f64) -> bool {
        match self {
            Sign::Inflow => amount > 0.0,
            Sign::Outflow => amount < 0.0,
        }
    }
}

/// Everything a rule may look at, computed once per transaction
#[derive(Debug, Clone, PartialEq)]
pub struct RuleContext {
    /// Normalized `description + " " + comments`
    pub text: String,
    /// Uppercased bank-supplied category
    pub bank_category: String,
    pub amount: f64,
    pub weekday: Option<Weekday>,
}

/// The predicate half of a rule
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Any keyword in the normalized text, whatever the sign
    Keywords(KeywordSet),
    /// Any keyword in the normalized text, and the amount has the given sign
    SignedKeywords { sign: Sign, keywords: KeywordSet },
    /// Saturday or Sunday, and money went out
    WeekendDebit,
    /// Any keyword in the bank-supplied category
    BankCategory(KeywordSet),
    /// Always matches
    Default,
}

impl Matcher {
    pub fn matches(&self, ctx: &RuleContext) -> bool {
        match self {
            Matcher::Keywords(kws) => kws.matches(&ctx.text),
            Matcher::SignedKeywords { sign, keywords } => {
                sign.holds(ctx.amount) && keywords.matches(&ctx.text)
            }
            Matcher::WeekendDebit => ctx.weekday.is_some_and(is_weekend) && ctx.amount < 0.0,
            Matcher::BankCategory(kws) => kws.matches(&ctx.bank_category),
            Matcher::Default => true,
        }
    }

    /// Short human-readable form, for `kumbaras rules`
    pub fn describe(&self) -> String {
        match self {
            Matcher::Keywords(kws) => format!("text contains any of {:?}", kws.keywords()),
            Matcher::SignedKeywords { sign, keywords } => {
                let sign = match sign {
                    Sign::Inflow => "amount > 0",
                    Sign::Outflow => "amount < 0",
                };
                format!("{sign} and text contains any of {:?}", keywords.keywords())
            }
            Matcher::WeekendDebit => "Saturday/Sunday and amount < 0".to_string(),
            Matcher::BankCategory(kws) => {
                format!("bank category contains any of {:?}", kws.keywords())
            }
            Matcher::Default => "always".to_string(),
        }
    }
}

/// A predicate plus the classification it assigns
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Stable identifier (`self-transfer`, `weekend`, `default`, ...)
    pub name: &'static str,
    pub matcher: Matcher,
    pub category: Category,
    pub subcategory: &'static str,
}

impl Rule {
    fn new(
        name: &'static str,
        matcher: Matcher,
        category: Category,
        subcategory: &'static str,
    ) -> Self {
        Self {
            name,
            matcher,
            category,
            subcategory,
        }
    }

    fn keywords(
        name: &'static str,
        keywords: &[&str],
        category: Category,
        subcategory: &'static str,
    ) -> Self {
        Self::new(name, Matcher::Keywords(keywords.into()), category, subcategory)
    }

    fn bank(
        name: &'static str,
        keywords: &[&str],
        category: Category,
        subcategory: &'static str,
    ) -> Self {
        Self::new(name, Matcher::BankCategory(keywords.into()), category, subcategory)
    }
}

/// Ordered, immutable rule list. The last rule is always `default`.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    fn new(mut rules: Vec<Rule>) -> Self {
        rules.retain(|r| r.matcher != Matcher::Default);
        rules.push(Rule::new(
            "default",
            Matcher::Default,
            Category::Misc,
            sub::UNCATEGORIZED,
        ));
        Self { rules }
    }

    /// The built-in table, recognizing the default owner aliases.
    pub fn standard() -> Self {
        Self::with_owner_aliases(OWNER_ALIASES.iter().copied())
    }

    /// The built-in table, with the self-transfer rule keyed on `aliases`
    /// (the owner's name as it appears on outgoing transfers). Aliases are
    /// normalized the same way as statement text.
    pub fn with_owner_aliases<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let aliases = KeywordSet::new(
            aliases
                .into_iter()
                .map(|a| crate::normalize::fold_upper(a.as_ref().trim()))
                .filter(|a| !a.is_empty()),
        );

        Self::new(vec![
            Rule::new(
                "self-transfer",
                Matcher::SignedKeywords {
                    sign: Sign::Outflow,
                    keywords: aliases,
                },
                Category::Savings,
                sub::SELF_TRANSFER,
            ),
            Rule::keywords("payroll", PAYROLL, Category::Salary, sub::SALARY),
            Rule::new(
                "deposit",
                Matcher::SignedKeywords {
                    sign: Sign::Inflow,
                    keywords: DEPOSIT.into(),
                },
                Category::DepositGift,
                sub::DEPOSITS,
            ),
            Rule::keywords("rent", RENT, Category::HomeUtilities, sub::RENT),
            Rule::keywords("utilities", UTILITIES, Category::HomeUtilities, sub::BILLS),
            Rule::keywords(
                "supermarket",
                SUPERMARKETS,
                Category::Supermarket,
                sub::GROCERIES,
            ),
            Rule::keywords("delivery", DELIVERY, Category::Lifestyle, sub::DELIVERY),
            Rule::keywords(
                "dining",
                DINING,
                Category::Lifestyle,
                sub::DINING_AND_COFFEE,
            ),
            Rule::keywords(
                "entertainment",
                ENTERTAINMENT,
                Category::Lifestyle,
                sub::ENTERTAINMENT,
            ),
            Rule::keywords(
                "tech-home",
                TECH_AND_HOME,
                Category::Shopping,
                sub::TECH_AND_HOME,
            ),
            Rule::keywords("clothing", CLOTHING, Category::Shopping, sub::CLOTHING),
            Rule::keywords(
                "health-beauty",
                HEALTH_AND_BEAUTY,
                Category::Shopping,
                sub::HEALTH_AND_BEAUTY,
            ),
            Rule::keywords("vice", VICE, Category::Shopping, sub::MISC_SHOPPING),
            Rule::keywords(
                "peer-transfer",
                PEER_TRANSFERS,
                Category::Misc,
                sub::PEER_TRANSFERS,
            ),
            Rule::keywords("transport", TRANSPORT, Category::Transport, sub::COMMUTE),
            Rule::keywords("fintech", FINTECH, Category::FinTech, sub::PLATFORM_FEES),
            // Any weekend debit still unmatched here counts as eating out.
            Rule::new(
                "weekend",
                Matcher::WeekendDebit,
                Category::Lifestyle,
                sub::DINING_AND_COFFEE,
            ),
            Rule::bank(
                "bank-restaurants",
                BANK_RESTAURANTS,
                Category::Lifestyle,
                sub::DINING_AND_COFFEE,
            ),
            Rule::bank(
                "bank-supermarket",
                BANK_SUPERMARKET,
                Category::Supermarket,
                sub::GROCERIES,
            ),
            Rule::bank(
                "bank-clothing",
                BANK_CLOTHING,
                Category::Shopping,
                sub::CLOTHING_BANK,
            ),
            Rule::bank(
                "bank-health",
                BANK_HEALTH,
                Category::Shopping,
                sub::HEALTH_BANK,
            ),
            Rule::bank(
                "bank-tech",
                BANK_TECH,
                Category::Misc,
                sub::UNCATEGORIZED_TECH,
            ),
        ])
    }

    /// First rule whose predicate holds. Total: `default` always matches.
    pub fn first_match(&self, ctx: &RuleContext) -> &Rule {
        self.rules
            .iter()
            .find(|r| r.matcher.matches(ctx))
            .unwrap_or_else(|| self.default_rule())
    }

    fn default_rule(&self) -> &Rule {
        // new() guarantees the table is non-empty and ends with `default`
        &self.rules[self.rules.len() - 1]
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(text: &str, amount: f64, weekday: Option<Weekday>, bank: &str) -> RuleContext {
        RuleContext {
            text: text.to_string(),
            bank_category: bank.to_string(),
            amount,
            weekday,
        }
    }

    fn rule_for(table: &RuleTable, text: &str, amount: f64) -> &'static str {
        table.first_match(&ctx(text, amount, Some(Weekday::Tue), "")).name
    }

    #[test]
    fn test_priority_order_is_exact() {
        let names: Vec<_> = RuleTable::standard().rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "self-transfer",
                "payroll",
                "deposit",
                "rent",
                "utilities",
                "supermarket",
                "delivery",
                "dining",
                "entertainment",
                "tech-home",
                "clothing",
                "health-beauty",
                "vice",
                "peer-transfer",
                "transport",
                "fintech",
                "weekend",
                "bank-restaurants",
                "bank-supermarket",
                "bank-clothing",
                "bank-health",
                "bank-tech",
                "default",
            ]
        );
    }

    #[test]
    fn test_default_is_last_and_always_matches() {
        let table = RuleTable::standard();
        let last = table.rules().last().unwrap();
        assert_eq!(last.name, "default");
        assert!(last.matcher.matches(&ctx("", 0.0, None, "")));
    }

    #[test]
    fn test_each_keyword_rule_fires_on_its_own() {
        let t = RuleTable::standard();
        assert_eq!(rule_for(&t, "ΜΕΤΑΦΟΡΑ ΠΡΟΣ TINIAKOS", -100.0), "self-transfer");
        assert_eq!(rule_for(&t, "ΜΙΣΘΟΔΟΣΙΑ", 1500.0), "payroll");
        assert_eq!(rule_for(&t, "ΚΑΤΑΘΕΣΗ ΜΕΤΡΗΤΩΝ", 50.0), "deposit");
        assert_eq!(rule_for(&t, "ΕΝΟΙΚΙΟ", -450.0), "rent");
        assert_eq!(rule_for(&t, "COSMOTE BILL", -30.0), "utilities");
        assert_eq!(rule_for(&t, "LIDL HELLAS", -40.0), "supermarket");
        assert_eq!(rule_for(&t, "EFOOD ORDER", -15.0), "delivery");
        assert_eq!(rule_for(&t, "GREGORYS 12", -3.0), "dining");
        assert_eq!(rule_for(&t, "NETFLIX.COM", -13.99), "entertainment");
        assert_eq!(rule_for(&t, "IKEA ATHENS", -80.0), "tech-home");
        assert_eq!(rule_for(&t, "ZARA 33", -60.0), "clothing");
        assert_eq!(rule_for(&t, "FARMAKEIO", -9.0), "health-beauty");
        assert_eq!(rule_for(&t, "IQOS SHOP", -20.0), "vice");
        assert_eq!(rule_for(&t, "IRIS PAYMENT", -10.0), "peer-transfer");
        assert_eq!(rule_for(&t, "OASA TICKETING", -1.2), "entertainment");
        assert_eq!(rule_for(&t, "UBER TRIP", -8.0), "transport");
        assert_eq!(rule_for(&t, "REVOLUT", -100.0), "fintech");
    }

    #[test]
    fn test_earlier_rule_preempts_later_keyword() {
        let t = RuleTable::standard();
        // BARBER also contains BAR; dining sits above health & beauty
        assert_eq!(rule_for(&t, "BARBER SHOP", -12.0), "dining");
        // PIZZA (delivery) beats CAFE (dining)
        assert_eq!(rule_for(&t, "PIZZA CAFE", -12.0), "delivery");
    }

    #[test]
    fn test_sign_gates() {
        let t = RuleTable::standard();
        // incoming money from the owner's other account is not a savings transfer
        assert_eq!(rule_for(&t, "TINIAKOS", 100.0), "default");
        assert_eq!(rule_for(&t, "ΚΑΤΑΘΕΣΗ", -100.0), "default");
        assert_eq!(rule_for(&t, "ΚΑΤΑΘΕΣΗ", 0.0), "default");
    }

    #[test]
    fn test_weekend_needs_debit_and_weekend() {
        let t = RuleTable::standard();
        assert_eq!(t.first_match(&ctx("X", -5.0, Some(Weekday::Sun), "")).name, "weekend");
        assert_eq!(t.first_match(&ctx("X", 5.0, Some(Weekday::Sun), "")).name, "default");
        assert_eq!(t.first_match(&ctx("X", -5.0, Some(Weekday::Fri), "")).name, "default");
        assert_eq!(t.first_match(&ctx("X", -5.0, None, "")).name, "default");
    }

    #[test]
    fn test_bank_category_fallbacks() {
        let t = RuleTable::standard();
        let name = |bank: &str| t.first_match(&ctx("X", -5.0, Some(Weekday::Mon), bank)).name;
        assert_eq!(name("ΕΣΤΙΑΤΟΡΙΑ - ΚΑΦΕ"), "bank-restaurants");
        assert_eq!(name("SUPERMARKET"), "bank-supermarket");
        assert_eq!(name("ΑΞΕΣΟΥΑΡ"), "bank-clothing");
        assert_eq!(name("ΥΓΕΙΑ"), "bank-health");
        assert_eq!(name("ΤΕΧΝΟΛΟΓΙΑ"), "bank-tech");
        assert_eq!(name("ΛΟΙΠΑ"), "default");
    }

    #[test]
    fn test_custom_owner_aliases_replace_defaults() {
        let t = RuleTable::with_owner_aliases(["Papadopoulos", "  "]);
        assert_eq!(rule_for(&t, "TO PAPADOPOULOS", -50.0), "self-transfer");
        assert_eq!(rule_for(&t, "TO TINIAKOS", -50.0), "default");
        let sr = t.get("self-transfer").unwrap();
        match &sr.matcher {
            Matcher::SignedKeywords { keywords, .. } => {
                assert_eq!(keywords.keywords(), &["PAPADOPOULOS".to_string()]);
            }
            other => panic!("unexpected matcher {:?}", other),
        }
    }

    #[test]
    fn test_describe_mentions_keywords() {
        let t = RuleTable::standard();
        assert!(t.get("vice").unwrap().matcher.describe().contains("IQOS"));
        assert_eq!(t.get("weekend").unwrap().matcher.describe(), "Saturday/Sunday and amount < 0");
    }
}
