use wiremock::{
  matchers::{method, path, query_param},
  Mock, MockServer, ResponseTemplate,
};

use super::*;
use crate::{
  classify::KeywordClassifier,
  output::{render_table, write_csv, CsvOutcome},
};

const SEARCH_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<eSearchResult>
  <Count>3</Count>
  <IdList><Id>100</Id><Id>200</Id><Id>300</Id></IdList>
</eSearchResult>"#;

const FETCH_XML: &str = r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle, 1st January 2024//EN" "https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_240101.dtd">
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">100</PMID>
      <Article PubModel="Print">
        <Journal>
          <JournalIssue CitedMedium="Internet">
            <PubDate><Year>2023</Year><Month>Mar</Month></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Checkpoint inhibitors in practice.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Okafor</LastName><ForeName>Ada</ForeName><Initials>A</Initials>
            <AffiliationInfo><Affiliation>Department of Oncology, University of Lagos, Nigeria.</Affiliation></AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">200</PMID>
      <Article PubModel="Print">
        <Journal>
          <JournalIssue CitedMedium="Internet">
            <PubDate><Year>2024</Year><Month>Jan</Month></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>A novel antibody for <i>HER2</i>-positive tumours.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Doe</LastName><ForeName>Jane</ForeName><Initials>J</Initials>
            <AffiliationInfo><Affiliation>Research Division, Helix Biotech Inc., Boston, MA, USA.</Affiliation></AffiliationInfo>
            <AffiliationInfo><Affiliation>Contact: jane.doe@biotechcorp.com</Affiliation></AffiliationInfo>
          </Author>
          <Author ValidYN="Y">
            <LastName>Roe</LastName><ForeName>John</ForeName><Initials>J</Initials>
            <AffiliationInfo><Affiliation>Harvard Medical School, Boston, MA, USA.</Affiliation></AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">300</PMID>
      <Article PubModel="Print">
        <ArticleTitle>Survey of clinicians.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y"><CollectiveName>The Survey Group</CollectiveName></Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

async fn mock_eutils() -> MockServer {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/esearch.fcgi"))
    .and(query_param("term", "cancer treatment"))
    .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_XML))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/efetch.fcgi"))
    .and(query_param("id", "100,200,300"))
    .respond_with(ResponseTemplate::new(200).set_body_string(FETCH_XML))
    .expect(1)
    .mount(&server)
    .await;
  server
}

#[traced_test]
#[tokio::test]
async fn test_pipeline_keeps_only_company_papers() -> anyhow::Result<()> {
  let server = mock_eutils().await;
  let client = PubmedClient::new().with_base_url(&server.uri())?;

  let ids = client.search("cancer treatment").await?;
  assert_eq!(ids, vec!["100", "200", "300"]);

  let articles = client.fetch_details(&ids).await?;
  assert_eq!(articles.len(), 3);

  let papers = paper::extract(&articles, &KeywordClassifier::default())?;
  assert_eq!(papers, vec![PaperRecord {
    pubmed_id:            "200".into(),
    title:                "A novel antibody for HER2-positive tumours.".into(),
    publication_date:     "2024".into(),
    authors:              "Jane Doe, John Roe".into(),
    company_affiliations: "Research Division, Helix Biotech Inc., Boston, MA, USA.".into(),
    corresponding_email:  "jane.doe@biotechcorp.com".into(),
  }]);
  Ok(())
}

#[tokio::test]
async fn test_pipeline_output() -> anyhow::Result<()> {
  let server = mock_eutils().await;
  let client = PubmedClient::new().with_base_url(&server.uri())?;
  let ids = client.search("cancer treatment").await?;
  let papers = paper::extract(&client.fetch_details(&ids).await?, &KeywordClassifier::default())?;

  let table = render_table(&papers);
  assert!(table.contains("Helix Biotech Inc."));
  assert!(!table.contains("University of Lagos"));

  let dir = tempfile::tempdir()?;
  let path = dir.path().join("out").join("results.csv");
  assert_eq!(write_csv(&papers, &path)?, CsvOutcome::Written(1));
  let contents = std::fs::read_to_string(&path)?;
  assert!(contents.starts_with(
    "PubmedID,Title,Publication Date,Non-academic Author(s),Company Affiliation(s),Corresponding \
     Author Email"
  ));
  Ok(())
}
