//! [`Query`] collection related to the multiple [`Item`]s of all owners.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Item,
    infra::{database, Database},
    read::item::{Filter, Order, Ranked},
    Query, Service,
};

/// [`Query`] of a list of [`Item`]s of all owners.
#[derive(Clone, Copy, Debug, Default)]
pub struct List {
    /// [`Order`] to list [`Item`]s in.
    pub order: Order,

    /// [`Filter`] of the listed [`Item`]s.
    pub filter: Filter,
}

impl<Db> Query<List> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Item>, ()>>,
        Ok = Vec<Item>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Item>;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        List { order, filter }: List,
    ) -> Result<Self::Ok, Self::Err> {
        let mut items = self
            .database()
            .execute(Select(By::<Vec<Item>, _>::new(())))
            .map_err(tracerr::wrap!())?;
        items.retain(|i| filter.matches(i));
        items.sort_by(|a, b| order.compare(a, b));
        Ok(items)
    }
}

/// [`Query`] of the most lent [`Item`]s of all owners.
///
/// Only [`Item`]s lent at least once are ranked, and no more of them than
/// [`Config::ranking_size`] allows. Equally popular [`Item`]s keep their
/// owners order, and then their names order.
///
/// [`Config::ranking_size`]: crate::Config::ranking_size
#[derive(Clone, Copy, Debug, Default)]
pub struct Top;

impl<Db> Query<Top> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Item>, ()>>,
        Ok = Vec<Item>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Ranked>;
    type Err = Traced<database::Error>;

    fn execute(&self, _: Top) -> Result<Self::Ok, Self::Err> {
        let mut items = self
            .database()
            .execute(Select(By::<Vec<Item>, _>::new(())))
            .map_err(tracerr::wrap!())?;
        items.sort_by(Item::cmp_by_popularity);
        Ok(items
            .into_iter()
            .take(self.config().ranking_size)
            .enumerate()
            .filter(|(_, i)| i.loan_count > 0)
            .map(|(n, item)| Ranked { rank: n + 1, item })
            .collect())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{
            fixture::{electronic_game, name, service, user},
            Command as _, RegisterItem, RegisterLoan, ReturnLoan,
        },
        domain::{loan, Item},
        infra::Memory,
        read::item::{Filter, Order},
        Config, Service,
    };

    use super::{List, Query as _, Top};

    fn names(items: &[Item]) -> Vec<String> {
        items.iter().map(|i| i.name.to_string()).collect()
    }

    fn lend_times(svc: &Service<Memory>, item: &str, times: u32) {
        for day in 1..=times {
            let key = loan::Key {
                owner: user("Ana"),
                borrower: user("Bia"),
                item: name(item),
                started_at: format!("{day:02}/01/2024").parse().unwrap(),
            };
            _ = svc
                .execute(RegisterLoan {
                    key: key.clone(),
                    period: 1,
                })
                .unwrap();
            _ = svc
                .execute(ReturnLoan {
                    key,
                    returned_at: "31/01/2024".parse().unwrap(),
                })
                .unwrap();
        }
    }

    #[test]
    fn lists_by_name_and_price() {
        let svc = service(Config::default());
        _ = svc
            .execute(RegisterItem {
                owner: user("Bia"),
                item: electronic_game("Asteroids", "5"),
            })
            .unwrap();

        let by_name = svc.execute(List::default()).unwrap();
        assert_eq!(names(&by_name), ["Asteroids", "Catan", "Halo", "Lost"]);

        let by_price = svc
            .execute(List {
                order: Order::Price,
                filter: Filter::All,
            })
            .unwrap();
        assert_eq!(names(&by_price), ["Asteroids", "Catan", "Lost", "Halo"]);
    }

    #[test]
    fn filters_by_loan_status() {
        let svc = service(Config::default());
        _ = svc
            .execute(RegisterLoan {
                key: loan::Key {
                    owner: user("Ana"),
                    borrower: user("Bia"),
                    item: name("Lost"),
                    started_at: "01/01/2024".parse().unwrap(),
                },
                period: 7,
            })
            .unwrap();

        let on_loan = svc
            .execute(List {
                order: Order::Name,
                filter: Filter::OnLoan,
            })
            .unwrap();
        assert_eq!(names(&on_loan), ["Lost"]);

        let available = svc
            .execute(List {
                order: Order::Name,
                filter: Filter::Available,
            })
            .unwrap();
        assert_eq!(names(&available), ["Catan", "Halo"]);
    }

    #[test]
    fn ranks_most_lent_excluding_never_lent() {
        let svc = service(Config::default());
        for (n, count) in [("A", 5), ("B", 0), ("C", 3), ("D", 9), ("E", 1)] {
            _ = svc
                .execute(RegisterItem {
                    owner: user("Ana"),
                    item: electronic_game(n, "1"),
                })
                .unwrap();
            lend_times(&svc, n, count);
        }
        lend_times(&svc, "Halo", 3);

        let top = svc.execute(Top).unwrap();

        assert_eq!(
            top.iter()
                .map(|r| (r.rank, r.item.name.to_string(), r.item.loan_count))
                .collect::<Vec<_>>(),
            [
                (1, "D".into(), 9),
                (2, "A".into(), 5),
                (3, "C".into(), 3),
                (4, "Halo".into(), 3),
                (5, "E".into(), 1),
            ],
        );
        assert_eq!(top[0].to_string(), "1) 9 loans - D - 1.00 - PC");
    }

    #[test]
    fn limits_ranking_size() {
        let svc = service(Config {
            ranking_size: 2,
            ..Config::default()
        });
        for (n, count) in [("A", 1), ("B", 2), ("C", 3)] {
            _ = svc
                .execute(RegisterItem {
                    owner: user("Ana"),
                    item: electronic_game(n, "1"),
                })
                .unwrap();
            lend_times(&svc, n, count);
        }

        let top = svc.execute(Top).unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[1].item.name, name("B"));
    }
}
