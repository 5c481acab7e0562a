// Criterion benchmarks for Matchmaker Hub

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matchmaker_hub::core::{build_partner_filter, Matcher, PageRequest};
use matchmaker_hub::models::{
    AccountStatus, Choice, Customer, EmploymentType, Gender, Importance, MaritalStatus, Religion,
};
use matchmaker_hub::services::MemoryStore;
use uuid::Uuid;

fn create_candidate(id: usize, matchmaker_id: Uuid) -> Customer {
    let gender = if id % 2 == 0 { Gender::Female } else { Gender::Male };
    Customer {
        id: Uuid::new_v4(),
        matchmaker_id,
        first_name: format!("User{}", id),
        last_name: "Bench".to_string(),
        gender,
        date_of_birth: NaiveDate::from_ymd_opt(1988 + (id % 12) as i32, 1 + (id % 12) as u32, 1).unwrap(),
        country: if id % 5 == 0 { "Nepal" } else { "India" }.to_string(),
        city: "Delhi".to_string(),
        height: 150 + (id % 40) as i32,
        email: format!("user{}@example.com", id),
        phone: format!("{:010}", id),
        college: "DU".to_string(),
        degree: "BA".to_string(),
        income: 200_000 + (id as i64 % 20) * 100_000,
        employment_type: EmploymentType::Private,
        company: None,
        designation: "Analyst".to_string(),
        marital_status: if id % 7 == 0 { MaritalStatus::Divorced } else { MaritalStatus::NeverMarried },
        languages: vec!["Hindi".to_string()],
        hobbies: vec!["Travel".to_string()],
        siblings: 1,
        caste: if id % 3 == 0 { "X" } else { "Y" }.to_string(),
        religion: if id % 4 == 0 { Religion::Sikh } else { Religion::Hindu },
        want_kids: Choice::Yes,
        open_to_relocate: Choice::Maybe,
        open_to_pets: Choice::No,
        account_status: AccountStatus::Unmatched,
        avatar: None,
        join_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(id as i64),
        bio: "Benchmark profile".to_string(),
        family_size: 4,
        importance_of_caste: Importance::Medium,
        importance_of_religion: Importance::High,
    }
}

fn create_seeker(matchmaker_id: Uuid) -> Customer {
    let mut seeker = create_candidate(1, matchmaker_id);
    seeker.height = 178;
    seeker.income = 1_500_000;
    seeker.date_of_birth = NaiveDate::from_ymd_opt(1994, 6, 1).unwrap();
    seeker
}

fn bench_build_filter(c: &mut Criterion) {
    let seeker = create_seeker(Uuid::new_v4());

    c.bench_function("build_partner_filter", |b| {
        b.iter(|| build_partner_filter(black_box(&seeker)));
    });
}

fn bench_filter_evaluation(c: &mut Criterion) {
    let matchmaker = Uuid::new_v4();
    let filter = build_partner_filter(&create_seeker(matchmaker));

    let mut group = c.benchmark_group("filter_matches");

    for candidate_count in [100, 1_000, 10_000].iter() {
        let candidates: Vec<Customer> = (0..*candidate_count)
            .map(|i| create_candidate(i, matchmaker))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("candidates", candidate_count),
            &candidates,
            |b, candidates| {
                b.iter(|| {
                    let matched = candidates.iter().filter(|c| filter.matches(c)).count();
                    black_box(matched)
                });
            },
        );
    }

    group.finish();
}

fn bench_find_partners(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let matchmaker = Uuid::new_v4();
    let seeker = create_seeker(matchmaker);
    let seeker_id = seeker.id;

    let mut customers: Vec<Customer> = (0..1_000).map(|i| create_candidate(i, matchmaker)).collect();
    customers.push(seeker);
    let store = MemoryStore::with_customers(customers);
    let matcher = Matcher::with_default_limits();
    let page = PageRequest::new(1, 20).unwrap();

    c.bench_function("find_partners_memory_1000", |b| {
        b.iter(|| {
            rt.block_on(matcher.find_partners(&store, matchmaker, black_box(seeker_id), page))
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_build_filter, bench_filter_evaluation, bench_find_partners);

criterion_main!(benches);
