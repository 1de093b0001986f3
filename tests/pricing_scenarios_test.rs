use plan_pricing::core::evaluator::apply_rules;
use plan_pricing::core::selector::get_price;
use plan_pricing::{
    compute_price, Currency, Plan, PriceList, PricePair, PricingContext, PricingEngine,
    PricingError, Rule, SessionDiscountCode, UnmatchedCurrencyPolicy,
};

fn ten_percent_increase() -> Rule {
    Rule {
        percent_increase: 10,
        ..Rule::for_both_prices("10% increase price")
    }
}

fn two_pence_off() -> Rule {
    Rule {
        amount_decrease: 2,
        ..Rule::for_both_prices("Two pence off")
    }
}

fn xmas_discount() -> Rule {
    Rule {
        requires_discount_code: true,
        discount_code: Some("xmas".to_string()),
        percent_discount: 100,
        ..Rule::for_both_prices("100% discount")
    }
}

fn hair_gel() -> Plan {
    Plan::new("Hair Gel", 500, 10).with_price_lists(vec![
        PriceList::new(
            "USD default pricelist",
            Currency::Usd,
            vec![ten_percent_increase(), two_pence_off()],
        ),
        PriceList::new("GBP default pricelist", Currency::Gbp, vec![xmas_discount()]),
    ])
}

/// GBP 價格表：出示 xmas 折扣碼可全額折抵
#[test]
fn test_gbp_full_discount_with_code() {
    let session = SessionDiscountCode::with_code("xmas");

    let prices = compute_price(&hair_gel(), Currency::Gbp, Some(&session)).unwrap();

    assert_eq!(prices, PricePair::new(0, 0));
}

/// USD 價格表：加價 10% 後減 2，週期價格以原價為基準
#[test]
fn test_usd_increase_then_amount_off() {
    let session = SessionDiscountCode::with_code("xmas");

    let prices = compute_price(&hair_gel(), Currency::Usd, Some(&session)).unwrap();

    assert_eq!(<(i64, i64)>::from(prices), (548, 9));
}

#[test]
fn test_eur_amount_increase() {
    let soap = Plan::new("Soap", 1500, 10).with_price_lists(vec![PriceList::new(
        "EUR default pricelist",
        Currency::Eur,
        vec![Rule {
            amount_increase: 100,
            ..Rule::for_both_prices("One euro on top")
        }],
    )]);

    let prices = compute_price(&soap, Currency::Eur, None).unwrap();

    assert_eq!(prices.sell_price, 1600);
    assert_eq!(prices.interval_price, 110);
}

#[test]
fn test_plan_without_price_lists_keeps_base_prices() {
    let tea = Plan::new("Tea", 0, 2000);

    for currency in Currency::ALL {
        assert_eq!(compute_price(&tea, currency, None).unwrap(), PricePair::new(0, 2000));
    }
}

#[test]
fn test_wrong_or_missing_code_leaves_prices() {
    let wrong = SessionDiscountCode::with_code("Xmas");
    let empty = SessionDiscountCode::default();

    for source in [Some(&wrong), Some(&empty), None] {
        let prices = compute_price(
            &hair_gel(),
            Currency::Gbp,
            source.map(|s| s as &dyn plan_pricing::DiscountCodeSource),
        )
        .unwrap();
        assert_eq!(prices, PricePair::new(500, 10));
    }
}

#[test]
fn test_rule_order_matters() {
    let plan = Plan::new("Hair Gel", 500, 10);
    let context = PricingContext::default();

    let increase_first = apply_rules(&plan, &[ten_percent_increase(), two_pence_off()], &context);
    let decrease_first = apply_rules(&plan, &[two_pence_off(), ten_percent_increase()], &context);

    assert_eq!(increase_first.sell_price, 548);
    // 498 + 49
    assert_eq!(decrease_first.sell_price, 547);
    // 區間價格的百分比加價會重設為原價 10 -> 11，先前的 -2 被覆蓋
    assert_eq!(decrease_first.interval_price, 11);
}

#[test]
fn test_interval_increase_ignores_earlier_interval_adjustments() {
    let plan = Plan::new("Hair Gel", 500, 10);
    let rules = vec![
        Rule {
            percent_discount: 50,
            ..Rule::for_both_prices("half off")
        },
        ten_percent_increase(),
    ];

    let prices = apply_rules(&plan, &rules, &PricingContext::default());

    // sell 500 -> 250 -> 275; interval 10 -> 5, then reset to 10 -> 11
    assert_eq!(prices, PricePair::new(275, 11));
}

#[test]
fn test_closure_as_discount_code_source() {
    let from_session = || Some("xmas".to_string());
    let context = PricingContext::new(&from_session);

    let prices = get_price(
        &hair_gel(),
        Currency::Gbp,
        &context,
        UnmatchedCurrencyPolicy::Error,
    )
    .unwrap();

    assert_eq!(prices, PricePair::new(0, 0));
}

#[test]
fn test_unmatched_currency_policies() {
    let plan = hair_gel();

    assert!(matches!(
        compute_price(&plan, Currency::Eur, None),
        Err(PricingError::NoMatchingPriceList { .. })
    ));

    let fallback = PricingEngine::with_policy(UnmatchedCurrencyPolicy::BasePrice);
    assert_eq!(
        fallback.price(&plan, Currency::Eur, None).unwrap(),
        PricePair::new(500, 10)
    );
}

/// 接近 i64 上限的價格不會溢位
#[test]
fn test_large_sell_price_with_percent_increase() {
    let big = Plan::new("Big", i64::MAX / 5, 10).with_price_lists(vec![PriceList::new(
        "USD default pricelist",
        Currency::Usd,
        vec![ten_percent_increase()],
    )]);

    let prices = compute_price(&big, Currency::Usd, None).unwrap();

    assert_eq!(prices.sell_price, i64::MAX / 5 + i64::MAX / 50);
    assert_eq!(prices.interval_price, 11);
}
