use super::*;

fn info(current: u32, total: u32) -> Pagination {
    Pagination {
        pagina_actual: current,
        total_paginas: total,
        total_usuarios: u64::from(total) * 25,
        por_pagina: 25,
        has_prev: current > 1,
        has_next: current < total,
    }
}

// =============================================================
// PageSize
// =============================================================

#[test]
fn page_size_values() {
    let values: Vec<u32> = PageSize::ALL.into_iter().map(PageSize::get).collect();
    assert_eq!(values, vec![25, 50, 100]);
    assert_eq!(PageSize::default(), PageSize::TwentyFive);
}

#[test]
fn page_size_parses_only_offered_values() {
    assert_eq!("50".parse::<PageSize>().unwrap(), PageSize::Fifty);
    assert_eq!(" 100 ".parse::<PageSize>().unwrap(), PageSize::Hundred);
    assert!("30".parse::<PageSize>().is_err());
    assert!("many".parse::<PageSize>().is_err());
    assert_eq!(PageSize::from_value(10), None);
}

// =============================================================
// PageState
// =============================================================

#[test]
fn defaults_to_first_page_of_one() {
    let state = PageState::new();
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.total_pages(), 1);
    assert!(state.search_term.is_empty());
}

#[test]
fn contains_checks_bounds() {
    let mut state = PageState::new();
    state.apply(&info(2, 4));
    assert!(!state.contains(0));
    assert!(state.contains(1));
    assert!(state.contains(4));
    assert!(!state.contains(5));
}

#[test]
fn apply_clamps_out_of_range_server_page() {
    let mut state = PageState::new();
    state.apply(&info(9, 3));
    assert_eq!(state.current_page(), 3);
}

#[test]
fn apply_treats_zero_total_as_one() {
    let mut state = PageState::new();
    state.apply(&info(1, 0));
    assert_eq!(state.total_pages(), 1);
    assert_eq!(state.current_page(), 1);
}

#[test]
fn page_size_change_rewinds_to_first_page() {
    let mut state = PageState::new();
    state.apply(&info(3, 5));
    state.set_page_size(PageSize::Fifty);
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.query(state.current_page()).page_size, PageSize::Fifty);
}

#[test]
fn search_rewinds_to_first_page() {
    let mut state = PageState::new();
    state.apply(&info(4, 5));
    state.set_search("ana");
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.search_term, "ana");
}

#[test]
fn query_pairs_use_server_names() {
    let mut state = PageState::new();
    state.set_search("lópez");
    let pairs = state.query(2).to_pairs();
    assert_eq!(
        pairs,
        vec![("pagina", "2".to_owned()), ("por_pagina", "25".to_owned()), ("busqueda", "lópez".to_owned())]
    );
}

#[test]
fn request_page_passes_through_until_total_known() {
    let mut state = PageState::new();
    assert_eq!(state.request_page(7), 7);
    assert_eq!(state.request_page(0), 1);

    state.apply(&info(1, 3));
    assert_eq!(state.request_page(7), 3);
    assert_eq!(state.request_page(2), 2);
}
