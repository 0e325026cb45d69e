use crate::model::{Filter, FilterList, FilterOption};

/// Search filters offered by the advanced search page, all ignored.
pub fn filter_list() -> FilterList {
    FilterList(vec![Filter::Category(category_list()), Filter::Genres(genre_list())])
}

// Captured from https://mintmanga.live/search/advanced, ids are the onclick targets
// of `tr.advanced_option span.js-link`. Keep in sync with the site by hand.
fn category_list() -> Vec<FilterOption> {
    vec![
        FilterOption::new("В цвете", "el_4614"),
        FilterOption::new("Веб", "el_1355"),
        FilterOption::new("Выпуск приостановлен", "el_5232"),
        FilterOption::new("Ёнкома", "el_2741"),
        FilterOption::new("Комикс западный", "el_1903"),
        FilterOption::new("Комикс русский", "el_2173"),
        FilterOption::new("Манхва", "el_1873"),
        FilterOption::new("Маньхуа", "el_1875"),
        FilterOption::new("Не Яой", "el_1874"),
        FilterOption::new("Ранобэ", "el_5688"),
        FilterOption::new("Сборник", "el_1348"),
    ]
}

fn genre_list() -> Vec<FilterOption> {
    vec![
        FilterOption::new("арт", "el_2220"),
        FilterOption::new("бара", "el_1353"),
        FilterOption::new("боевик", "el_1346"),
        FilterOption::new("боевые искусства", "el_1334"),
        FilterOption::new("вампиры", "el_1339"),
        FilterOption::new("гарем", "el_1333"),
        FilterOption::new("гендерная интрига", "el_1347"),
        FilterOption::new("героическое фэнтези", "el_1337"),
        FilterOption::new("детектив", "el_1343"),
        FilterOption::new("дзёсэй", "el_1349"),
        FilterOption::new("додзинси", "el_1332"),
        FilterOption::new("драма", "el_1310"),
        FilterOption::new("игра", "el_5229"),
        FilterOption::new("история", "el_1311"),
        FilterOption::new("киберпанк", "el_1351"),
        FilterOption::new("комедия", "el_1328"),
        FilterOption::new("меха", "el_1318"),
        FilterOption::new("мистика", "el_1324"),
        FilterOption::new("научная фантастика", "el_1325"),
        FilterOption::new("омегаверс", "el_5676"),
        FilterOption::new("повседневность", "el_1327"),
        FilterOption::new("постапокалиптика", "el_1342"),
        FilterOption::new("приключения", "el_1322"),
        FilterOption::new("психология", "el_1335"),
        FilterOption::new("романтика", "el_1313"),
        FilterOption::new("самурайский боевик", "el_1316"),
        FilterOption::new("сверхъестественное", "el_1350"),
        FilterOption::new("сёдзё", "el_1314"),
        FilterOption::new("сёдзё-ай", "el_1320"),
        FilterOption::new("сёнэн", "el_1326"),
        FilterOption::new("сёнэн-ай", "el_1330"),
        FilterOption::new("спорт", "el_1321"),
        FilterOption::new("сэйнэн", "el_1329"),
        FilterOption::new("трагедия", "el_1344"),
        FilterOption::new("триллер", "el_1341"),
        FilterOption::new("ужасы", "el_1317"),
        FilterOption::new("фантастика", "el_1331"),
        FilterOption::new("фэнтези", "el_1323"),
        FilterOption::new("школа", "el_1319"),
        FilterOption::new("эротика", "el_1340"),
        FilterOption::new("этти", "el_1354"),
        FilterOption::new("юри", "el_1315"),
        FilterOption::new("яой", "el_1336"),
    ]
}
