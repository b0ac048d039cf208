//! Term/definition tables shown under the charts.

/// `(term, definition)` pairs, in display order.
pub type Glossary = &'static [(&'static str, &'static str)];

pub const MODEL_GLOSSARY: Glossary = &[
    (
        "Linear Regression",
        "Linear Regression calculates the output by assigning a coefficient to each of the \
         variables. It chooses the coefficients so that the overall predictive error is \
         minimized. Conceptually, for a single predictor variable, you are fitting a line of \
         best fit on the data.",
    ),
    (
        "Decision Tree",
        "A Decision Tree algorithm calculates the value through a series of yes/no logic. It is \
         like playing a game of 20 questions: the algorithm asks a series of yes/no questions \
         about the data until it can make a prediction.",
    ),
    (
        "Random Forest",
        "A Random Forest model randomly generates a number of decision trees and takes the \
         average of their results.",
    ),
    (
        "K Nearest Neighbors (KNN)",
        "K Nearest Neighbors makes a prediction by taking the average result of a number of data \
         points that are most similar to the data that you are trying to predict.",
    ),
    (
        "Support Vector Regression (SVR)",
        "Support Vector Regression makes predictions while trying to fit the error within a \
         certain threshold.",
    ),
];

pub const ECONOMIC_GLOSSARY: Glossary = &[
    (
        "Official Cash Rate (OCR)",
        "The Official Cash Rate (OCR) in New Zealand is an interest rate set by the Reserve Bank \
         of New Zealand. It defines the wholesale price of borrowed money and influences all \
         other interest rates. This rate directly affects the commercial banks, determining the \
         rates they offer their customers. The Reserve Bank uses the OCR to achieve and maintain \
         price stability. To keep prices stable, the Government has set an inflation target \
         between 1% and 3% over the medium term with a focus on the 2% midpoint. Increasing the \
         OCR increases interest rates and helps bring inflation down.",
    ),
    (
        "Consumer Price Index (CPI)",
        "The CPI is a measure that examines the weighted average of prices of a basket of \
         consumer goods and services, such as transportation, food, and medical care. It is \
         calculated by taking price changes for each item in the predetermined basket of goods \
         and averaging them. CPI is the main measure used to measure inflation, the rate at \
         which prices are increasing.",
    ),
    (
        "House Price Index (HPI)",
        "The HPI measures the price changes of residential properties. The HPI is a tool that \
         measures changes in single-family home prices across the country.",
    ),
    (
        "Gross Domestic Product (GDP)",
        "GDP is the total monetary or market value of all the finished goods and services \
         produced within a country's borders in a specific time period. It serves as a \
         comprehensive scorecard of a given country's economic health.",
    ),
    (
        "Government Spending",
        "Government spending refers to the money spent by the public sector on the acquisition \
         of goods and provision of services such as education, healthcare, social protection, \
         and defense. In the calculation of GDP, government spending denotes expenditures on \
         goods and services by the government. It is one of the components of GDP.",
    ),
    (
        "Consumption",
        "Consumption is defined as the use of goods and services by a household. It is a \
         component in the calculation of the GDP. Macroeconomists typically use consumption as \
         a proxy of the overall economy. Consumer spending accounts for between half and \
         two-thirds of GDP in most countries.",
    ),
    (
        "Unemployment Rate",
        "The Unemployment Rate is the percentage of unemployed individuals in an economy among \
         individuals currently in the labour force. Here, unemployed individuals are those who \
         are currently not working but are actively seeking work.",
    ),
];

/// Definition of `term`, if the glossary has it.
pub fn definition(glossary: Glossary, term: &str) -> Option<&'static str> {
    glossary
        .iter()
        .find(|(t, _)| *t == term)
        .map(|(_, def)| *def)
}

/// First term of a glossary, used as the initial selection.
pub fn first_term(glossary: Glossary) -> &'static str {
    glossary.first().map(|(t, _)| *t).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_term_resolves_to_its_definition() {
        for glossary in [MODEL_GLOSSARY, ECONOMIC_GLOSSARY] {
            for (term, def) in glossary {
                assert_eq!(definition(glossary, term), Some(*def));
                assert!(!def.is_empty());
            }
        }
        assert_eq!(MODEL_GLOSSARY.len(), 5);
        assert_eq!(ECONOMIC_GLOSSARY.len(), 7);
    }

    #[test]
    fn unknown_term_has_no_definition() {
        assert_eq!(definition(MODEL_GLOSSARY, "Official Cash Rate (OCR)"), None);
        assert_eq!(definition(ECONOMIC_GLOSSARY, ""), None);
    }

    #[test]
    fn terms_are_unique() {
        for glossary in [MODEL_GLOSSARY, ECONOMIC_GLOSSARY] {
            let mut terms: Vec<_> = glossary.iter().map(|(t, _)| *t).collect();
            terms.sort_unstable();
            terms.dedup();
            assert_eq!(terms.len(), glossary.len());
        }
    }

    #[test]
    fn first_term_is_the_initial_selection() {
        assert_eq!(first_term(MODEL_GLOSSARY), "Linear Regression");
        assert_eq!(first_term(ECONOMIC_GLOSSARY), "Official Cash Rate (OCR)");
        assert_eq!(first_term(&[]), "");
    }
}
