mod charset;
