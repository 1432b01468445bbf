//! Seller and shipping-provider dashboards over a shared bid repository.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::NaiveDate;
use marketplace_rfq::application::services::{
    BidQuery, BidRankingService, BidSortField, SortDirection, filter_and_sort_bids,
};
use marketplace_rfq::domain::entities::{Bid, CompetingBid, ShippingBid};
use marketplace_rfq::domain::value_objects::{
    BidId, BidStatus, OrderId, PartyId, Price, PriceTier, Timestamp,
};
use marketplace_rfq::infrastructure::persistence::BidRepository;
use marketplace_rfq::infrastructure::persistence::in_memory::InMemoryBidRepository;
use rust_decimal::Decimal;
use std::sync::Arc;

fn at(secs: i64) -> Timestamp {
    Timestamp::from_secs(1_717_200_000 + secs).unwrap()
}

fn price(value: &str) -> Price {
    value.parse().unwrap()
}

fn product_bid(id: &str, order: &str, seller: &str, amount: &str, secs: i64) -> Bid {
    Bid::new(
        BidId::new(id),
        OrderId::new(order),
        PartyId::new(seller),
        price(amount),
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
        "Dock 3, Rotterdam",
        at(secs),
    )
    .unwrap()
}

#[test]
fn tied_lowest_bids_share_first_place() {
    let repo = Arc::new(InMemoryBidRepository::new());
    for bid in [
        product_bid("b1", "ord-1", "s1", "100", 1),
        product_bid("b2", "ord-1", "s2", "100", 2),
        product_bid("b3", "ord-1", "s3", "120", 3),
    ] {
        repo.save(&bid).unwrap();
    }
    let service = BidRankingService::new(repo);

    let third = service
        .compare_for_order(&OrderId::new("ord-1"), &PartyId::new("s3"))
        .unwrap()
        .unwrap();
    assert_eq!(third.rank, 3);
    assert_eq!(third.diff_from_lowest, Decimal::from(20));
    assert_eq!(third.competitor_count, 2);
    assert_eq!(third.tier, PriceTier::HighPrice);
    assert!(third.is_highest);

    let second = service
        .compare_for_order(&OrderId::new("ord-1"), &PartyId::new("s2"))
        .unwrap()
        .unwrap();
    assert_eq!(second.rank, 1);
    assert!(second.is_lowest);
    assert_eq!(second.tier, PriceTier::BestPrice);

    let outsider = service
        .compare_for_order(&OrderId::new("ord-1"), &PartyId::new("s9"))
        .unwrap();
    assert!(outsider.is_none());
}

#[test]
fn revised_bid_replaces_the_earlier_one() {
    let repo = Arc::new(InMemoryBidRepository::new());
    let original = product_bid("b1", "ord-7", "s1", "200", 1);
    repo.save(&original).unwrap();
    repo.save(&product_bid("b2", "ord-7", "s2", "180", 2)).unwrap();
    repo.save(&original.revise(price("150"), at(10)).unwrap())
        .unwrap();
    let service = BidRankingService::new(repo.clone());

    let mine = service
        .compare_for_order(&OrderId::new("ord-7"), &PartyId::new("s1"))
        .unwrap()
        .unwrap();
    assert_eq!(mine.my_bid.get(), Decimal::from(150));
    assert_eq!(mine.total_bidders, 2);
    assert!(mine.is_lowest);
    assert_eq!(repo.count().unwrap(), 2);
}

#[test]
fn shipping_provider_sees_its_standing() {
    let repo = Arc::new(InMemoryBidRepository::<ShippingBid>::new());
    let eta = NaiveDate::from_ymd_opt(2024, 6, 25).unwrap();
    for (id, provider, amount) in [("sb1", "dhl", "80"), ("sb2", "ups", "88"), ("sb3", "fedex", "95")] {
        let bid = ShippingBid::new(
            BidId::new(id),
            OrderId::new("ord-2"),
            PartyId::new(provider),
            price(amount),
            eta,
            at(0),
        )
        .unwrap();
        repo.save(&bid).unwrap();
    }
    let service = BidRankingService::new(repo);

    let ups = service
        .compare_for_order(&OrderId::new("ord-2"), &PartyId::new("ups"))
        .unwrap()
        .unwrap();
    assert_eq!(ups.rank, 2);
    assert_eq!(ups.diff_from_lowest, Decimal::from(10));
    assert_eq!(ups.tier, PriceTier::Competitive);

    let standings = service.standings(&OrderId::new("ord-2")).unwrap();
    let providers: Vec<&str> = standings.iter().map(|s| s.bid.shipping_provider_id().as_str()).collect();
    assert_eq!(providers, ["dhl", "ups", "fedex"]);
}

#[test]
fn seller_bid_list_sorted_by_status_priority() {
    let bids = vec![
        product_bid("b1", "ord-1", "me", "10", 1).with_status(BidStatus::Rejected, at(5)),
        product_bid("b2", "ord-2", "me", "11", 2),
        product_bid("b3", "ord-3", "me", "12", 3).with_status(BidStatus::Accepted, at(6)),
    ];
    let sorted = filter_and_sort_bids(
        bids,
        &BidQuery::new().sort(BidSortField::StatusPriority, SortDirection::Ascending),
    );
    let ids: Vec<&str> = sorted.iter().map(|b| b.id().as_str()).collect();
    assert_eq!(ids, ["b2", "b3", "b1"]);
}
